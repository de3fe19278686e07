use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    // 唯一 ID
    pub id: i64,
    // 所属提交 ID（一份提交至多一条反馈）
    pub submission_id: i64,
    // 撰写反馈的教师 ID（只有本人可在评分后修改评语）
    pub teacher_id: i64,
    // 评语
    pub comments: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
