use serde::{Deserialize, Serialize};

// 提交形式：纯文本或文件，作业一旦收到提交便不可更改
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmissionType {
    Text,
    File,
}

impl SubmissionType {
    pub const TEXT: &'static str = "TEXT";
    pub const FILE: &'static str = "FILE";
}

impl<'de> Deserialize<'de> for SubmissionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionType::TEXT => Ok(SubmissionType::Text),
            SubmissionType::FILE => Ok(SubmissionType::File),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交形式: '{s}'. 支持的形式: TEXT, FILE"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Text => write!(f, "{}", SubmissionType::TEXT),
            SubmissionType::File => write!(f, "{}", SubmissionType::FILE),
        }
    }
}

impl std::str::FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(SubmissionType::Text),
            "FILE" => Ok(SubmissionType::File),
            _ => Err(format!("Invalid submission type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属教师 ID
    pub teacher_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 提交形式
    pub submission_type: SubmissionType,
    // 满分
    pub max_score: f64,
    // 是否已发布（学生仅可见已发布的作业）
    pub is_published: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_submission_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&SubmissionType::Text).unwrap(),
            "\"TEXT\""
        );
        assert_eq!(
            SubmissionType::from_str("FILE").unwrap(),
            SubmissionType::File
        );
        assert!(serde_json::from_str::<SubmissionType>("\"text\"").is_err());
    }
}
