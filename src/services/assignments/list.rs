use std::sync::Arc;

use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::AssignmentListParams;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 按角色列出作业：教师看到自己的全部作业（含未发布），学生看到全系统已发布作业
pub async fn list_assignments(
    storage: &Arc<dyn Storage>,
    caller: &User,
    params: AssignmentListParams,
) -> Result<(Vec<Assignment>, PaginationInfo)> {
    let (page, size) = params.pagination.normalized();
    match caller.role {
        UserRole::Teacher => {
            storage
                .list_assignments_by_teacher(caller.id, page, size)
                .await
        }
        UserRole::Student => storage.list_published_assignments(page, size).await,
    }
}
