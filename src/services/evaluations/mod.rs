pub mod evaluate;
pub mod feedback;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::{EvaluateSubmissionRequest, UpdateFeedbackRequest};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
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

    // 教师一次性评阅提交
    pub async fn evaluate(
        &self,
        submission_id: i64,
        payload: EvaluateSubmissionRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let result = evaluate::evaluate_submission(&storage, &caller, submission_id, payload).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(result, "评阅成功")))
    }

    // 查询提交的评语
    pub async fn feedback(&self, submission_id: i64, request: &HttpRequest) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let feedback = feedback::get_feedback(&storage, &caller, submission_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "查询成功")))
    }

    // 评语作者修改评语文本
    pub async fn update_feedback(
        &self,
        submission_id: i64,
        payload: UpdateFeedbackRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let caller = RequireJWT::current_user(request)?;
        let feedback = feedback::update_feedback(&storage, &caller, submission_id, payload).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "评语更新成功")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssignmentSystemError;
    use crate::models::assignments::entities::{Assignment, SubmissionType};
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::submissions::entities::{Submission, SubmissionStatus};
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::users::entities::{User, UserRole};
    use crate::services::{assignments, submissions};
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

    async fn seed_published_assignment(storage: &Arc<dyn Storage>, teacher_id: i64) -> Assignment {
        let assignment = storage
            .create_assignment(
                teacher_id,
                CreateAssignmentRequest {
                    title: "期末项目报告".to_string(),
                    description: "提交项目的完整报告与运行说明".to_string(),
                    due_date: Utc::now() + Duration::days(7),
                    submission_type: SubmissionType::Text,
                    max_score: Some(100.0),
                },
            )
            .await
            .expect("seed assignment");
        storage
            .set_assignment_published(assignment.id, true)
            .await
            .expect("publish")
            .expect("assignment exists")
    }

    async fn seed_submission(
        storage: &Arc<dyn Storage>,
        assignment_id: i64,
        student: &User,
        content: &str,
    ) -> Submission {
        submissions::create::submit_assignment(
            storage,
            student,
            assignment_id,
            CreateSubmissionRequest {
                content: Some(content.to_string()),
                file: None,
            },
        )
        .await
        .expect("seed submission")
    }

    fn evaluation(score: f64, comments: &str) -> EvaluateSubmissionRequest {
        EvaluateSubmissionRequest {
            score,
            comments: comments.to_string(),
        }
    }

    #[tokio::test]
    async fn test_score_bounds_validation() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t1@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s1@example.com", UserRole::Student).await;
        let assignment = seed_published_assignment(&storage, teacher.id).await;
        let submission = seed_submission(&storage, assignment.id, &student, "我的答案正文").await;

        for score in [-5.0, 100.5, f64::NAN, f64::INFINITY] {
            let err = evaluate::evaluate_submission(
                &storage,
                &teacher,
                submission.id,
                evaluation(score, "分数不合法时这条评语不应落库"),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AssignmentSystemError::Validation(_)));
        }

        // 校验失败不应产生任何状态变化
        let unchanged = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::Submitted);
        assert!(unchanged.score.is_none());
        assert!(
            storage
                .get_feedback_by_submission(submission.id)
                .await
                .unwrap()
                .is_none()
        );

        // 边界值本身是合法的
        let result = evaluate::evaluate_submission(
            &storage,
            &teacher,
            submission.id,
            evaluation(100.0, "满分，完成得非常出色"),
        )
        .await
        .unwrap();
        assert_eq!(result.submission.score, Some(100.0));
    }

    #[tokio::test]
    async fn test_one_shot_evaluation() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t2@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s2@example.com", UserRole::Student).await;
        let assignment = seed_published_assignment(&storage, teacher.id).await;
        let submission = seed_submission(&storage, assignment.id, &student, "第一次提交的内容").await;

        let result = evaluate::evaluate_submission(
            &storage,
            &teacher,
            submission.id,
            evaluation(88.5, "结构清晰，论证有说服力"),
        )
        .await
        .unwrap();
        assert_eq!(result.submission.status, SubmissionStatus::Evaluated);
        assert_eq!(result.submission.score, Some(88.5));
        assert_eq!(result.feedback.teacher_id, teacher.id);

        // 重复评阅被拒绝，分数保持不变
        let err = evaluate::evaluate_submission(
            &storage,
            &teacher,
            submission.id,
            evaluation(60.0, "想把分数改低也不行"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        let unchanged = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.score, Some(88.5));
    }

    #[tokio::test]
    async fn test_evaluate_requires_assignment_owner() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t3@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t4@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s3@example.com", UserRole::Student).await;
        let assignment = seed_published_assignment(&storage, teacher.id).await;
        let submission = seed_submission(&storage, assignment.id, &student, "等待评阅的内容").await;

        let err = evaluate::evaluate_submission(
            &storage,
            &other_teacher,
            submission.id,
            evaluation(90.0, "别的老师不能来评阅"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        // 不存在的提交
        let err = evaluate::evaluate_submission(
            &storage,
            &teacher,
            9999,
            evaluation(90.0, "这条提交并不存在"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_feedback_visibility_and_author_update() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t5@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t6@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s4@example.com", UserRole::Student).await;
        let other_student = seed_user(&storage, "s5@example.com", UserRole::Student).await;
        let assignment = seed_published_assignment(&storage, teacher.id).await;
        let submission = seed_submission(&storage, assignment.id, &student, "请老师批阅").await;

        // 评阅前没有评语
        let err = feedback::get_feedback(&storage, &student, submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));

        evaluate::evaluate_submission(
            &storage,
            &teacher,
            submission.id,
            evaluation(75.0, "内容完整，细节还可以打磨"),
        )
        .await
        .unwrap();

        // 提交学生与所属教师可读，其他人不可读
        assert!(
            feedback::get_feedback(&storage, &student, submission.id)
                .await
                .is_ok()
        );
        assert!(
            feedback::get_feedback(&storage, &teacher, submission.id)
                .await
                .is_ok()
        );
        let err = feedback::get_feedback(&storage, &other_student, submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        // 只有评语作者可以修改
        let err = feedback::update_feedback(
            &storage,
            &other_teacher,
            submission.id,
            UpdateFeedbackRequest {
                comments: "替别人改评语是不允许的".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));

        let updated = feedback::update_feedback(
            &storage,
            &teacher,
            submission.id,
            UpdateFeedbackRequest {
                comments: "  补充：图表部分做得很好  ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.comments, "补充：图表部分做得很好");

        // 评语修改不影响分数
        let submission = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.score, Some(75.0));
    }

    // 完整生命周期：建课 -> 发布 -> 两版提交 -> 名册 -> 评阅 -> 可见性
    #[tokio::test]
    async fn test_full_assignment_lifecycle() {
        let storage = test_storage().await;
        let teacher = seed_user(&storage, "t7@example.com", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "t8@example.com", UserRole::Teacher).await;
        let student = seed_user(&storage, "s6@example.com", UserRole::Student).await;

        let assignment = assignments::create::create_assignment(
            &storage,
            &teacher,
            crate::models::assignments::requests::CreateAssignmentRequest {
                title: "学期末综合练习".to_string(),
                description: "完成所有章节的综合练习并整理解题思路".to_string(),
                due_date: Utc::now() + Duration::days(14),
                submission_type: SubmissionType::Text,
                max_score: Some(100.0),
            },
        )
        .await
        .unwrap();
        assignments::publish::set_published(&storage, &teacher, assignment.id, true)
            .await
            .unwrap();

        seed_submission(&storage, assignment.id, &student, "初稿，先占个位置").await;
        let v2 = seed_submission(&storage, assignment.id, &student, "修订稿，补全了第三章").await;
        assert_eq!(v2.version, 2);

        // 名册里学生只出现一行，且是最新版本
        let (rows, pagination) = submissions::roster::list_assignment_roster(
            &storage,
            &teacher,
            assignment.id,
            Default::default(),
        )
        .await
        .unwrap();
        assert_eq!(pagination.total, 1);
        assert_eq!(rows[0].submission.version, 2);

        let result = evaluate::evaluate_submission(
            &storage,
            &teacher,
            v2.id,
            evaluation(95.0, "Great work, clear structure."),
        )
        .await
        .unwrap();
        assert_eq!(result.submission.status, SubmissionStatus::Evaluated);

        let err = evaluate::evaluate_submission(
            &storage,
            &teacher,
            v2.id,
            evaluation(90.0, "第二次评阅应当被拒绝"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));

        // 学生能读到评语，旁观教师连作业详情都看不到
        let feedback = feedback::get_feedback(&storage, &student, v2.id).await.unwrap();
        assert_eq!(feedback.comments, "Great work, clear structure.");

        let err = assignments::detail::get_assignment(&storage, &other_teacher, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
    }
}
