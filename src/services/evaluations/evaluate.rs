use std::sync::Arc;

use tracing::info;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::evaluations::requests::EvaluateSubmissionRequest;
use crate::models::evaluations::responses::EvaluationResponse;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate;

/// 教师一次性评阅某条提交：写入分数并附带评语
///
/// SUBMITTED -> EVALUATED 的状态转移与评语创建在存储层单事务完成，
/// 并发评阅同一条提交时只有一方成功，另一方得到 Conflict。
pub async fn evaluate_submission(
    storage: &Arc<dyn Storage>,
    caller: &User,
    submission_id: i64,
    payload: EvaluateSubmissionRequest,
) -> Result<EvaluationResponse> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("提交记录不存在"))?;

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_owner(&assignment, caller)?;

    // 预检：已评阅的提交直接拒绝，真正的兜底在存储层事务里
    if submission.status == SubmissionStatus::Evaluated {
        return Err(AssignmentSystemError::conflict("该提交已被评阅"));
    }

    if !payload.score.is_finite() || payload.score < 0.0 || payload.score > assignment.max_score {
        return Err(AssignmentSystemError::validation(format!(
            "分数必须在 0 到 {} 之间",
            assignment.max_score
        )));
    }
    validate::validate_comments(&payload.comments).map_err(AssignmentSystemError::validation)?;

    let (submission, feedback) = storage
        .evaluate_submission(submission_id, caller.id, payload.score, payload.comments.trim())
        .await?;

    info!(
        "Teacher {} evaluated submission {} (assignment {}, score {})",
        caller.id, submission_id, assignment.id, payload.score
    );
    Ok(EvaluationResponse {
        submission,
        feedback,
    })
}
