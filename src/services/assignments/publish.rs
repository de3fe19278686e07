use std::sync::Arc;

use tracing::info;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 切换作业发布状态
///
/// 发布（false→true）总是允许；取消发布只在尚无提交时允许。
pub async fn set_published(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
    publish: bool,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_owner(&assignment, caller)?;

    if !publish {
        let submission_count = storage.count_submissions_for_assignment(assignment_id).await?;
        if submission_count > 0 {
            return Err(AssignmentSystemError::conflict(
                "作业已有提交记录，无法取消发布",
            ));
        }
    }

    let assignment = storage
        .set_assignment_published(assignment_id, publish)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    info!(
        "Teacher {} set assignment {} published={}",
        caller.id, assignment_id, publish
    );
    Ok(assignment)
}
