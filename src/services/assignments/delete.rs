use std::sync::Arc;

use tracing::info;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 删除作业（仅限尚无提交的作业）
pub async fn delete_assignment(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
) -> Result<()> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_owner(&assignment, caller)?;

    let submission_count = storage.count_submissions_for_assignment(assignment_id).await?;
    if submission_count > 0 {
        return Err(AssignmentSystemError::conflict(
            "作业已有提交记录，无法删除",
        ));
    }

    if !storage.delete_assignment(assignment_id).await? {
        return Err(AssignmentSystemError::not_found("作业不存在"));
    }

    info!("Teacher {} deleted assignment {}", caller.id, assignment_id);
    Ok(())
}
