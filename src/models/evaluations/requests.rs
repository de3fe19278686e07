use serde::Deserialize;

/// 评分请求：一次性写入分数并附带评语
#[derive(Debug, Deserialize)]
pub struct EvaluateSubmissionRequest {
    pub score: f64,
    pub comments: String,
}

/// 修改评语请求（分数不可经此路径变更）
#[derive(Debug, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub comments: String,
}
