use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate;

/// 创建作业，初始状态为未发布
pub async fn create_assignment(
    storage: &Arc<dyn Storage>,
    caller: &User,
    payload: CreateAssignmentRequest,
) -> Result<Assignment> {
    if !caller.role.is_teacher() {
        return Err(AssignmentSystemError::forbidden("只有教师可以创建作业"));
    }

    validate::validate_title(&payload.title).map_err(AssignmentSystemError::validation)?;
    validate::validate_description(&payload.description)
        .map_err(AssignmentSystemError::validation)?;
    if let Some(max_score) = payload.max_score {
        validate::validate_max_score(max_score).map_err(AssignmentSystemError::validation)?;
    }

    // 截止时间必须严格晚于创建时刻
    if payload.due_date <= Utc::now() {
        return Err(AssignmentSystemError::validation("截止时间必须晚于当前时间"));
    }

    let assignment = storage.create_assignment(caller.id, payload).await?;
    info!(
        "Teacher {} created assignment {} ({})",
        caller.id, assignment.id, assignment.title
    );
    Ok(assignment)
}
