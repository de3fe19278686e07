use std::sync::Arc;

use crate::access;
use crate::errors::{AssignmentSystemError, Result};
use crate::models::PaginationInfo;
use crate::models::submissions::requests::SubmissionListParams;
use crate::models::submissions::responses::StudentLatestSubmission;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 教师查看某次作业的提交名册：每个学生只出现一行（最新版本）
pub async fn list_assignment_roster(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
    params: SubmissionListParams,
) -> Result<(Vec<StudentLatestSubmission>, PaginationInfo)> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    access::check_assignment_owner(&assignment, caller)?;

    let (page, size) = params.pagination.normalized();
    storage
        .list_latest_per_student(assignment_id, page, size)
        .await
}
