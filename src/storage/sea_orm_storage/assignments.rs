//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignmentSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建作业（初始未发布）
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            submission_type: Set(req.submission_type.to_string()),
            max_score: Set(req.max_score.unwrap_or(100.0)),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("创建作业失败: {e}"))
        })?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignmentSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 教师视角：分页列出自己创建的作业（全部发布状态）
    pub async fn list_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let paginator = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询作业总数失败: {e}"))
        })?;

        let assignments = paginator.fetch_page(page - 1).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询作业列表失败: {e}"))
        })?;

        Ok((
            assignments.into_iter().map(|m| m.into_assignment()).collect(),
            PaginationInfo::new(page as i64, size as i64, total as i64),
        ))
    }

    /// 学生视角：分页列出全部已发布作业，新创建的在前
    pub async fn list_published_assignments_impl(
        &self,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let paginator = Assignments::find()
            .filter(Column::IsPublished.eq(true))
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询作业总数失败: {e}"))
        })?;

        let assignments = paginator.fetch_page(page - 1).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询作业列表失败: {e}"))
        })?;

        Ok((
            assignments.into_iter().map(|m| m.into_assignment()).collect(),
            PaginationInfo::new(page as i64, size as i64, total as i64),
        ))
    }

    /// 更新作业字段（只执行补丁，业务规则由服务层把关）
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model.update(&self.db).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("更新作业失败: {e}"))
        })?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 设置发布状态
    pub async fn set_assignment_published_impl(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::IsPublished,
                sea_orm::sea_query::Expr::value(is_published),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("更新发布状态失败: {e}"))
            })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AssignmentSystemError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计某作业的提交数量
    pub async fn count_submissions_for_assignment_impl(&self, assignment_id: i64) -> Result<u64> {
        let count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("统计提交数量失败: {e}"))
            })?;

        Ok(count)
    }
}
