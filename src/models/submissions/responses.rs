use serde::Serialize;

use crate::models::submissions::entities::Submission;

/// 提交人摘要信息（教师榜单视图使用）
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStudentInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 单个学生的最新提交（教师查看作业名册时的一行）
#[derive(Debug, Serialize)]
pub struct StudentLatestSubmission {
    pub student: SubmissionStudentInfo,
    pub submission: Submission,
    /// 该学生对此作业的历史版本总数
    pub total_versions: i64,
}
