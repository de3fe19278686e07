pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod publish;
pub mod update;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, PaginatedResponse};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建作业（初始未发布）
    pub async fn create(
        &self,
        payload: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let assignment = create::create_assignment(&storage, &caller, payload).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
    }

    // 按角色列出作业：教师看自己的全部，学生看全部已发布
    pub async fn list(
        &self,
        params: AssignmentListParams,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let (assignments, pagination) = list::list_assignments(&storage, &caller, params).await?;
        Ok(HttpResponse::Ok().json(PaginatedResponse::new(assignments, pagination, "查询成功")))
    }

    // 作业详情
    pub async fn detail(&self, assignment_id: i64, request: &HttpRequest) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let assignment = detail::get_assignment(&storage, &caller, assignment_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
    }

    // 更新作业字段
    pub async fn update(
        &self,
        assignment_id: i64,
        payload: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let assignment =
            update::update_assignment(&storage, &caller, assignment_id, payload).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
    }

    // 删除作业
    pub async fn delete(&self, assignment_id: i64, request: &HttpRequest) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        delete::delete_assignment(&storage, &caller, assignment_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业删除成功")))
    }

    // 发布作业
    pub async fn publish(&self, assignment_id: i64, request: &HttpRequest) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let assignment = publish::set_published(&storage, &caller, assignment_id, true).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业发布成功")))
    }

    // 取消发布（仅限尚无提交的作业）
    pub async fn unpublish(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let assignment = publish::set_published(&storage, &caller, assignment_id, false).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业取消发布成功")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssignmentSystemError;
    use crate::models::assignments::entities::SubmissionType;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::users::entities::{User, UserRole};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use chrono::{Duration, Utc};

    async fn test_storage() -> Arc<dyn Storage> {
        Arc::new(
            SeaOrmStorage::new_with_url("sqlite::memory:")
                .await
                .expect("in-memory storage"),
        )
    }

    async fn seed_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
        storage
            .create_user("测试用户", email, "hash", role)
            .await
            .expect("seed user")
    }

    fn assignment_payload(days_from_now: i64) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: "第一次课后练习".to_string(),
            description: "完成教材第三章的全部练习题".to_string(),
            due_date: Utc::now() + Duration::days(days_from_now),
            submission_type: SubmissionType::Text,
            max_score: Some(100.0),
        }
    }

    async fn seed_text_submission(storage: &Arc<dyn Storage>, assignment_id: i64, student_id: i64) {
        let payload = CreateSubmissionRequest {
            content: Some("我的答案".to_string()),
            file: None,
        };
        storage
            .create_submission(assignment_id, student_id, &payload, false)
            .await
            .expect("seed submission");
    }

    #[tokio::test]
    async fn test_create_validates_due_date_and_bounds() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t1@example.com", UserRole::Teacher).await;

        // 截止时间已过
        let err = create::create_assignment(&storage, &teacher, assignment_payload(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));

        // 标题过短
        let mut payload = assignment_payload(7);
        payload.title = "ab".to_string();
        let err = create::create_assignment(&storage, &teacher, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));

        // 合法请求创建为未发布
        let assignment = create::create_assignment(&storage, &teacher, assignment_payload(7))
            .await
            .unwrap();
        assert!(!assignment.is_published);
        assert_eq!(assignment.teacher_id, teacher.id);
        assert_eq!(assignment.max_score, 100.0);
    }

    #[tokio::test]
    async fn test_student_cannot_create_assignment() {
        let storage = test_storage().await;
        let student = seed_user(&storage, "s1@example.com", UserRole::Student).await;
        let err = create::create_assignment(&storage, &student, assignment_payload(7))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_visibility_hiding_for_students() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t2@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t3@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s2@example.com", UserRole::Student).await;

        let assignment = create::create_assignment(&storage, &teacher, assignment_payload(7))
            .await
            .unwrap();

        // 学生探测未发布作业：NotFound，不暴露存在性
        let err = detail::get_assignment(&storage, &student, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));

        // 非所属教师：Forbidden（教师之间不隐藏存在性）
        let err = detail::get_assignment(&storage, &other_teacher, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        // 发布后学生可见
        publish::set_published(&storage, &teacher, assignment.id, true)
            .await
            .unwrap();
        let seen = detail::get_assignment(&storage, &student, assignment.id)
            .await
            .unwrap();
        assert!(seen.is_published);
    }

    #[tokio::test]
    async fn test_list_branches_by_role() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t4@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t5@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s3@example.com", UserRole::Student).await;

        let a1 = create::create_assignment(&storage, &teacher, assignment_payload(7))
            .await
            .unwrap();
        create::create_assignment(&storage, &other_teacher, assignment_payload(7))
            .await
            .unwrap();
        publish::set_published(&storage, &teacher, a1.id, true)
            .await
            .unwrap();

        // 教师只看到自己的作业（含未发布）
        let (own, pagination) =
            list::list_assignments(&storage, &teacher, AssignmentListParams::default()).await
                .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(pagination.total, 1);

        // 学生看到全系统已发布作业
        let (published, _) =
            list::list_assignments(&storage, &student, AssignmentListParams::default()).await
                .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id, a1.id);
    }

    #[tokio::test]
    async fn test_publish_lock_after_first_submission() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t6@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s4@example.com", UserRole::Student).await;

        let assignment = create::create_assignment(&storage, &teacher, assignment_payload(7))
            .await
            .unwrap();
        publish::set_published(&storage, &teacher, assignment.id, true)
            .await
            .unwrap();
        seed_text_submission(&storage, assignment.id, student.id).await;

        // 已有提交：改满分被拒
        let patch = UpdateAssignmentRequest {
            max_score: Some(60.0),
            ..Default::default()
        };
        let err = update::update_assignment(&storage, &teacher, assignment.id, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        // 已有提交：取消发布被拒
        let err = publish::set_published(&storage, &teacher, assignment.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        // 已有提交：删除被拒
        let err = delete::delete_assignment(&storage, &teacher, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        // 仅发布开关（false→true 方向）仍被放行
        let patch = UpdateAssignmentRequest {
            is_published: Some(true),
            ..Default::default()
        };
        assert!(
            update::update_assignment(&storage, &teacher, assignment.id, patch)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_before_submissions() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t7@example.com", UserRole::Teacher).await;

        let assignment = create::create_assignment(&storage, &teacher, assignment_payload(7))
            .await
            .unwrap();

        // 无提交时正常修改
        let patch = UpdateAssignmentRequest {
            title: Some("修订后的练习".to_string()),
            max_score: Some(50.0),
            ..Default::default()
        };
        let updated = update::update_assignment(&storage, &teacher, assignment.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.title, "修订后的练习");
        assert_eq!(updated.max_score, 50.0);

        // 空补丁被拒
        let err = update::update_assignment(
            &storage,
            &teacher,
            assignment.id,
            UpdateAssignmentRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));

        // 无提交时可删除
        delete::delete_assignment(&storage, &teacher, assignment.id)
            .await
            .unwrap();
        let err = detail::get_assignment(&storage, &teacher, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));
    }
}
