//! 评语存储操作

use super::SeaOrmStorage;
use crate::entity::feedbacks::{ActiveModel, Column, Entity as Feedbacks};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignmentSystemError, Result};
use crate::models::{
    evaluations::entities::Feedback,
    submissions::entities::{Submission, SubmissionStatus},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 一次性评阅：状态转移 + 评语创建在同一事务内完成
    ///
    /// 状态转移用条件更新实现（WHERE status = 'SUBMITTED'），
    /// 即使两个评阅请求并发到达，也只有一个能完成转移，另一个拿到 Conflict。
    pub async fn evaluate_submission_impl(
        &self,
        submission_id: i64,
        teacher_id: i64,
        score: f64,
        comments: &str,
    ) -> Result<(Submission, Feedback)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("开启评阅事务失败: {e}"))
        })?;

        let updated = Submissions::update_many()
            .col_expr(
                SubmissionColumn::Status,
                Expr::value(SubmissionStatus::Evaluated.to_string()),
            )
            .col_expr(SubmissionColumn::Score, Expr::value(score))
            .col_expr(SubmissionColumn::UpdatedAt, Expr::value(now))
            .filter(SubmissionColumn::Id.eq(submission_id))
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::Submitted.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("更新提交状态失败: {e}"))
            })?;

        if updated.rows_affected == 0 {
            txn.rollback().await.ok();
            return Err(AssignmentSystemError::conflict("该提交已被评阅"));
        }

        let feedback_model = ActiveModel {
            submission_id: Set(submission_id),
            teacher_id: Set(teacher_id),
            comments: Set(comments.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let feedback = match feedback_model.insert(&txn).await {
            Ok(f) => f,
            Err(e) => {
                txn.rollback().await.ok();
                // submission_id 唯一索引：评语已存在说明转移早已完成
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(AssignmentSystemError::conflict("该提交已被评阅"));
                }
                return Err(AssignmentSystemError::database_operation(format!(
                    "创建评语失败: {e}"
                )));
            }
        };

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("读取评阅结果失败: {e}"))
            })?
            .ok_or_else(|| {
                AssignmentSystemError::database_operation("评阅后提交记录不存在".to_string())
            })?;

        txn.commit().await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("提交评阅事务失败: {e}"))
        })?;

        Ok((submission.into_submission(), feedback.into_feedback()))
    }

    /// 获取提交的评语
    pub async fn get_feedback_by_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Feedback>> {
        let result = Feedbacks::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignmentSystemError::database_operation(format!("查询评语失败: {e}")))?;

        Ok(result.map(|m| m.into_feedback()))
    }

    /// 修改评语文本（分数不经此路径变更）
    pub async fn update_feedback_comments_impl(
        &self,
        submission_id: i64,
        comments: &str,
    ) -> Result<Option<Feedback>> {
        let now = chrono::Utc::now().timestamp();

        let result = Feedbacks::update_many()
            .col_expr(Column::Comments, Expr::value(comments.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::SubmissionId.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| AssignmentSystemError::database_operation(format!("更新评语失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_feedback_by_submission_impl(submission_id).await
    }
}
