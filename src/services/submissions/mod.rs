pub mod create;
pub mod detail;
pub mod my_list;
pub mod roster;
pub mod versions;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{CreateSubmissionRequest, SubmissionListParams};
use crate::models::{ApiResponse, PaginatedResponse};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 学生提交作业（重复提交总是追加新版本）
    pub async fn submit(
        &self,
        assignment_id: i64,
        payload: CreateSubmissionRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let submission = create::submit_assignment(&storage, &caller, assignment_id, payload).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
    }

    // 单条提交详情
    pub async fn detail(&self, submission_id: i64, request: &HttpRequest) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let submission = detail::get_submission(&storage, &caller, submission_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
    }

    // 当前学生的提交历史（跨作业，按时间倒序）
    pub async fn my_submissions(
        &self,
        params: SubmissionListParams,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let (submissions, pagination) =
            my_list::list_my_submissions(&storage, &caller, params).await?;
        Ok(HttpResponse::Ok().json(PaginatedResponse::new(submissions, pagination, "查询成功")))
    }

    // 教师花名册视图：每个学生只保留最新版本
    pub async fn roster(
        &self,
        assignment_id: i64,
        params: SubmissionListParams,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let (rows, pagination) =
            roster::list_assignment_roster(&storage, &caller, assignment_id, params).await?;
        Ok(HttpResponse::Ok().json(PaginatedResponse::new(rows, pagination, "查询成功")))
    }

    // 某作业下的版本历史：学生看自己的，所属教师看全部学生的
    pub async fn versions(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let submissions = versions::list_versions(&storage, &caller, assignment_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(submissions, "查询成功")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssignmentSystemError;
    use crate::models::assignments::entities::{Assignment, SubmissionType};
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::submissions::requests::SubmissionFileInfo;
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

    async fn seed_assignment(
        storage: &Arc<dyn Storage>,
        teacher_id: i64,
        submission_type: SubmissionType,
        due_in: Duration,
        published: bool,
    ) -> Assignment {
        let assignment = storage
            .create_assignment(
                teacher_id,
                CreateAssignmentRequest {
                    title: "随堂测验".to_string(),
                    description: "按题目要求完成并按时提交".to_string(),
                    due_date: Utc::now() + due_in,
                    submission_type,
                    max_score: Some(100.0),
                },
            )
            .await
            .expect("seed assignment");
        if published {
            storage
                .set_assignment_published(assignment.id, true)
                .await
                .expect("publish")
                .expect("assignment exists")
        } else {
            assignment
        }
    }

    fn text_payload(content: &str) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            content: Some(content.to_string()),
            file: None,
        }
    }

    #[tokio::test]
    async fn test_version_monotonicity() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t1@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s1@example.com", UserRole::Student).await;
        let assignment = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(7),
            true,
        )
        .await;

        // 连续提交版本严格为 1,2,3
        for expected_version in 1..=3 {
            let submission = create::submit_assignment(
                &storage,
                &student,
                assignment.id,
                text_payload(&format!("第 {expected_version} 稿")),
            )
            .await
            .unwrap();
            assert_eq!(submission.version, expected_version);
            assert_eq!(submission.status, SubmissionStatus::Submitted);
        }

        // 另一个学生的版本从 1 重新开始
        let other = seed_user(&storage, "s2@example.com", UserRole::Student).await;
        let submission =
            create::submit_assignment(&storage, &other, assignment.id, text_payload("我的答案"))
                .await
                .unwrap();
        assert_eq!(submission.version, 1);

        // 最新提交取最高版本
        let latest = storage
            .get_latest_submission(assignment.id, student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.version, 3);
    }

    #[tokio::test]
    async fn test_late_flag_fixed_at_creation() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t2@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s3@example.com", UserRole::Student).await;

        // 宽限内提交
        let on_time = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(1),
            true,
        )
        .await;
        let submission =
            create::submit_assignment(&storage, &student, on_time.id, text_payload("按时完成"))
                .await
                .unwrap();
        assert!(!submission.is_late);

        // 截止后创建的提交被标记为迟交（作业先正常创建再把截止时间改到过去）
        let overdue = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(1),
            true,
        )
        .await;
        storage
            .update_assignment(
                overdue.id,
                crate::models::assignments::requests::UpdateAssignmentRequest {
                    due_date: Some(Utc::now() - Duration::hours(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let submission =
            create::submit_assignment(&storage, &student, overdue.id, text_payload("来晚了"))
                .await
                .unwrap();
        assert!(submission.is_late);
    }

    #[tokio::test]
    async fn test_submit_requires_published_assignment() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t3@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s4@example.com", UserRole::Student).await;
        let unpublished = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(7),
            false,
        )
        .await;

        // 未发布：Conflict（作业存在但不可用）
        let err =
            create::submit_assignment(&storage, &student, unpublished.id, text_payload("试试"))
                .await
                .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        // 不存在的作业：NotFound
        let err = create::submit_assignment(&storage, &student, 9999, text_payload("试试"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));

        // 教师不能提交
        let published = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(7),
            true,
        )
        .await;
        let err = create::submit_assignment(&storage, &teacher, published.id, text_payload("老师交"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_payload_validated_against_submission_type() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t4@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s5@example.com", UserRole::Student).await;

        let text_assignment = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(7),
            true,
        )
        .await;

        // TEXT：空白内容被拒
        let err = create::submit_assignment(
            &storage,
            &student,
            text_assignment.id,
            text_payload("   "),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));

        // TEXT：内容会被去除首尾空白，文件描述被忽略
        let submission = create::submit_assignment(
            &storage,
            &student,
            text_assignment.id,
            CreateSubmissionRequest {
                content: Some("  正文  ".to_string()),
                file: Some(SubmissionFileInfo {
                    url: "/api/v1/files/download/x".to_string(),
                    name: "junk.pdf".to_string(),
                    size: 12,
                }),
            },
        )
        .await
        .unwrap();
        assert_eq!(submission.content.as_deref(), Some("正文"));
        assert!(submission.file_url.is_none());

        let file_assignment = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::File,
            Duration::days(7),
            true,
        )
        .await;

        // FILE：缺文件描述被拒
        let err = create::submit_assignment(
            &storage,
            &student,
            file_assignment.id,
            text_payload("只有文字"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));

        // FILE：文件 + 可选备注
        let submission = create::submit_assignment(
            &storage,
            &student,
            file_assignment.id,
            CreateSubmissionRequest {
                content: Some("见附件".to_string()),
                file: Some(SubmissionFileInfo {
                    url: "/api/v1/files/download/abc".to_string(),
                    name: "report.pdf".to_string(),
                    size: 2048,
                }),
            },
        )
        .await
        .unwrap();
        assert_eq!(submission.file_name.as_deref(), Some("report.pdf"));
        assert_eq!(submission.file_size, Some(2048));
        assert_eq!(submission.content.as_deref(), Some("见附件"));
    }

    #[tokio::test]
    async fn test_submission_visibility_and_lists() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t5@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t6@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s6@example.com", UserRole::Student).await;
        let other_student = seed_user(&storage, "s7@example.com", UserRole::Student).await;
        let assignment = seed_assignment(
            &storage,
            teacher.id,
            SubmissionType::Text,
            Duration::days(7),
            true,
        )
        .await;

        let v1 = create::submit_assignment(&storage, &student, assignment.id, text_payload("初稿"))
            .await
            .unwrap();
        create::submit_assignment(&storage, &student, assignment.id, text_payload("修订稿"))
            .await
            .unwrap();
        create::submit_assignment(&storage, &other_student, assignment.id, text_payload("答案"))
            .await
            .unwrap();

        // 单条提交的可见性
        assert!(detail::get_submission(&storage, &student, v1.id).await.is_ok());
        assert!(detail::get_submission(&storage, &teacher, v1.id).await.is_ok());
        let err = detail::get_submission(&storage, &other_student, v1.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
        let err = detail::get_submission(&storage, &other_teacher, v1.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        // 学生历史：两条，新在前
        let (mine, pagination) =
            my_list::list_my_submissions(&storage, &student, SubmissionListParams::default())
                .await
                .unwrap();
        assert_eq!(pagination.total, 2);
        assert!(mine[0].version >= mine[1].version);

        // 花名册：每个学生一行，取最高版本
        let (rows, pagination) = roster::list_assignment_roster(
            &storage,
            &teacher,
            assignment.id,
            SubmissionListParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(pagination.total, 2);
        let row = rows
            .iter()
            .find(|r| r.student.id == student.id)
            .expect("student row");
        assert_eq!(row.submission.version, 2);
        assert_eq!(row.total_versions, 2);

        // 花名册只对所属教师开放
        let err = roster::list_assignment_roster(
            &storage,
            &other_teacher,
            assignment.id,
            SubmissionListParams::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        // 版本历史：学生看自己的（2 条），所属教师看全部（3 条）
        let own = versions::list_versions(&storage, &student, assignment.id)
            .await
            .unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|s| s.student_id == student.id));

        let all = versions::list_versions(&storage, &teacher, assignment.id)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
