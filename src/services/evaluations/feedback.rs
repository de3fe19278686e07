use std::sync::Arc;

use tracing::info;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::evaluations::entities::Feedback;
use crate::models::evaluations::requests::UpdateFeedbackRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate;

/// 查询某条提交的评语，可见性与提交本身一致
pub async fn get_feedback(
    storage: &Arc<dyn Storage>,
    caller: &User,
    submission_id: i64,
) -> Result<Feedback> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("提交记录不存在"))?;

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_submission_view(&submission, &assignment, caller)?;

    storage
        .get_feedback_by_submission(submission_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("该提交暂无评语"))
}

/// 修改评语文本，仅限评语作者本人；分数不经此路径变更
pub async fn update_feedback(
    storage: &Arc<dyn Storage>,
    caller: &User,
    submission_id: i64,
    payload: UpdateFeedbackRequest,
) -> Result<Feedback> {
    let feedback = storage
        .get_feedback_by_submission(submission_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("该提交暂无评语"))?;

    if feedback.teacher_id != caller.id {
        return Err(AssignmentSystemError::forbidden("只有评语作者可以修改评语"));
    }

    validate::validate_comments(&payload.comments).map_err(AssignmentSystemError::validation)?;

    let updated = storage
        .update_feedback_comments(submission_id, payload.comments.trim())
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("该提交暂无评语"))?;

    info!(
        "Teacher {} updated feedback for submission {}",
        caller.id, submission_id
    );
    Ok(updated)
}
