use std::sync::Arc;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 读取单个作业，可见性规则见 access 模块
pub async fn get_assignment(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_view(&assignment, caller)?;
    Ok(assignment)
}
