use std::sync::Arc;

use chrono::Utc;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate;

/// 更新作业字段
///
/// 发布锁：一旦作业收到提交，除「is_published 从 false 置为 true」这一种补丁外，
/// 任何字段修改（含取消发布）都返回 Conflict。
pub async fn update_assignment(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
    patch: UpdateAssignmentRequest,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_owner(&assignment, caller)?;

    if patch.is_empty() {
        return Err(AssignmentSystemError::validation("没有需要更新的字段"));
    }

    if let Some(ref title) = patch.title {
        validate::validate_title(title).map_err(AssignmentSystemError::validation)?;
    }
    if let Some(ref description) = patch.description {
        validate::validate_description(description).map_err(AssignmentSystemError::validation)?;
    }
    if let Some(max_score) = patch.max_score {
        validate::validate_max_score(max_score).map_err(AssignmentSystemError::validation)?;
    }
    if let Some(due_date) = patch.due_date
        && due_date <= Utc::now()
    {
        return Err(AssignmentSystemError::validation("截止时间必须晚于当前时间"));
    }

    let submission_count = storage.count_submissions_for_assignment(assignment_id).await?;
    if submission_count > 0 && !patch.is_publish_toggle_only() {
        return Err(AssignmentSystemError::conflict(
            "作业已有提交记录，无法修改",
        ));
    }

    storage
        .update_assignment(assignment_id, patch)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))
}
