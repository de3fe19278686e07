use serde::Serialize;

use crate::models::evaluations::entities::Feedback;
use crate::models::submissions::entities::Submission;

/// 评分结果：更新后的提交与新建的反馈
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub submission: Submission,
    pub feedback: Feedback,
}
