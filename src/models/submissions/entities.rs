use serde::{Deserialize, Serialize};

// 提交状态：SUBMITTED 经一次性评分进入终态 EVALUATED，不可回退
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmissionStatus {
    Submitted,
    Evaluated,
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const EVALUATED: &'static str = "EVALUATED";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::EVALUATED => Ok(SubmissionStatus::Evaluated),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: SUBMITTED, EVALUATED"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Evaluated => write!(f, "{}", SubmissionStatus::EVALUATED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(SubmissionStatus::Submitted),
            "EVALUATED" => Ok(SubmissionStatus::Evaluated),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 所属作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 文本内容（TEXT 作业必填；FILE 作业为可选备注）
    pub content: Option<String>,
    // 文件地址（FILE 作业）
    pub file_url: Option<String>,
    // 文件原始名称
    pub file_name: Option<String>,
    // 文件大小（字节）
    pub file_size: Option<i64>,
    // 提交时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 是否迟交（提交时一次性计算，之后不再变化）
    pub is_late: bool,
    // 版本号：同一 (作业, 学生) 下从 1 开始严格递增
    pub version: i32,
    // 提交状态
    pub status: SubmissionStatus,
    // 得分（评分后填入，且不再变化）
    pub score: Option<f64>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
