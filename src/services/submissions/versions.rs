use std::sync::Arc;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 列出某次作业的提交版本历史
///
/// 学生只能看到自己的版本链；作业所属教师能看到所有学生的全部版本。
pub async fn list_versions(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
) -> Result<Vec<Submission>> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    match caller.role {
        UserRole::Student => {
            access::check_assignment_view(&assignment, caller)?;
            storage
                .list_submission_versions(assignment_id, caller.id)
                .await
        }
        UserRole::Teacher => {
            access::check_assignment_owner(&assignment, caller)?;
            storage.list_assignment_submissions(assignment_id).await
        }
    }
}
