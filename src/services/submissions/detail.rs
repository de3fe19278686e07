use std::sync::Arc;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 查询单条提交记录，按角色做可见性检查
pub async fn get_submission(
    storage: &Arc<dyn Storage>,
    caller: &User,
    submission_id: i64,
) -> Result<Submission> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("提交记录不存在"))?;

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_submission_view(&submission, &assignment, caller)?;
    Ok(submission)
}
