use std::sync::Arc;

use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::SubmissionListParams;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 学生查询自己的全部提交，跨作业、按时间倒序
pub async fn list_my_submissions(
    storage: &Arc<dyn Storage>,
    caller: &User,
    params: SubmissionListParams,
) -> Result<(Vec<Submission>, PaginationInfo)> {
    let (page, size) = params.pagination.normalized();
    storage
        .list_submissions_by_student(caller.id, page, size)
        .await
}
