//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignmentSystemError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::CreateSubmissionRequest,
        responses::{StudentLatestSubmission, SubmissionStudentInfo},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

/// 并发提交撞到同一版本号时的最大重试次数
const MAX_VERSION_RETRIES: usize = 3;

impl SeaOrmStorage {
    /// 创建提交（自动计算版本号）
    ///
    /// 版本号 = 该学生在该作业下的最大版本 + 1。读取-写入之间存在竞态窗口，
    /// 由 (assignment_id, student_id, version) 唯一索引兜底：
    /// 撞上唯一索引冲突就重新读取最大版本号再插入。
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: &CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission> {
        let mut attempts = 0;

        loop {
            // 查询当前最大版本号
            let max_version = Submissions::find()
                .filter(Column::AssignmentId.eq(assignment_id))
                .filter(Column::StudentId.eq(student_id))
                .select_only()
                .column_as(Column::Version.max(), "max_version")
                .into_tuple::<Option<i32>>()
                .one(&self.db)
                .await
                .map_err(|e| {
                    AssignmentSystemError::database_operation(format!("查询最大版本号失败: {e}"))
                })?
                .flatten()
                .unwrap_or(0);

            let now = chrono::Utc::now().timestamp();

            let model = ActiveModel {
                assignment_id: Set(assignment_id),
                student_id: Set(student_id),
                content: Set(req.content.clone()),
                file_url: Set(req.file.as_ref().map(|f| f.url.clone())),
                file_name: Set(req.file.as_ref().map(|f| f.name.clone())),
                file_size: Set(req.file.as_ref().map(|f| f.size)),
                submitted_at: Set(now),
                is_late: Set(is_late),
                version: Set(max_version + 1),
                status: Set(SubmissionStatus::Submitted.to_string()),
                score: Set(None),
                updated_at: Set(now),
                ..Default::default()
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_submission()),
                Err(e) => {
                    let is_version_clash =
                        matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)));
                    if is_version_clash && attempts < MAX_VERSION_RETRIES {
                        attempts += 1;
                        continue;
                    }
                    if is_version_clash {
                        return Err(AssignmentSystemError::conflict(
                            "提交版本分配冲突，请稍后重试",
                        ));
                    }
                    return Err(AssignmentSystemError::database_operation(format!(
                        "创建提交失败: {e}"
                    )));
                }
            }
        }
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignmentSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生对某作业的最新提交（最高版本）
    pub async fn get_latest_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Version)
            .one(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("查询最新提交失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 学生的提交历史（跨作业，按提交时间倒序，分页）
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Submission>, PaginationInfo)> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        // submitted_at 精度为秒，同秒提交靠 id 保持新在前
        let paginator = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询提交总数失败: {e}"))
        })?;

        let submissions = paginator.fetch_page(page - 1).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("查询提交历史失败: {e}"))
        })?;

        Ok((
            submissions.into_iter().map(|m| m.into_submission()).collect(),
            PaginationInfo::new(page as i64, size as i64, total as i64),
        ))
    }

    /// 学生对某作业的全部版本（版本倒序）
    pub async fn list_submission_versions_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Version)
            .all(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("查询提交版本失败: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 某作业的全部提交（按学生分组，组内版本倒序）
    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::StudentId)
            .order_by_desc(Column::Version)
            .all(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("查询作业提交失败: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 教师花名册视图：每个学生只保留最高版本的提交，按提交时间倒序
    pub async fn list_latest_per_student_impl(
        &self,
        assignment_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<StudentLatestSubmission>, PaginationInfo)> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        // 1. 查询该作业所有提交（按版本倒序，方便聚合时第一条即最新）
        let all_submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::Version)
            .all(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("查询提交列表失败: {e}"))
            })?;

        if all_submissions.is_empty() {
            return Ok((
                vec![],
                PaginationInfo::new(page as i64, size as i64, 0),
            ));
        }

        // 2. 按学生聚合：保留最高版本，并统计版本总数
        let mut student_latest: HashMap<i64, (&crate::entity::submissions::Model, i64)> =
            HashMap::new();
        for sub in &all_submissions {
            student_latest
                .entry(sub.student_id)
                .and_modify(|(_, count)| *count += 1)
                .or_insert((sub, 1));
        }

        // 3. 按最新提交时间倒序排序后分页
        let total = student_latest.len() as i64;
        let skip = ((page - 1) * size) as usize;

        let mut rows: Vec<_> = student_latest.into_iter().collect();
        // 同秒提交按提交记录 id 决定先后，保证分页稳定
        rows.sort_by(|a, b| {
            b.1.0
                .submitted_at
                .cmp(&a.1.0.submitted_at)
                .then(b.1.0.id.cmp(&a.1.0.id))
        });

        let paged: Vec<_> = rows.into_iter().skip(skip).take(size as usize).collect();

        // 4. 批量查询学生信息
        let student_ids: Vec<i64> = paged.iter().map(|(id, _)| *id).collect();
        let students = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_operation(format!("查询学生信息失败: {e}"))
            })?;
        let student_map: HashMap<i64, _> = students.into_iter().map(|u| (u.id, u)).collect();

        // 5. 组装结果
        let items = paged
            .into_iter()
            .map(|(student_id, (sub, total_versions))| {
                let student = student_map.get(&student_id);
                StudentLatestSubmission {
                    student: SubmissionStudentInfo {
                        id: student_id,
                        name: student
                            .map(|u| u.name.clone())
                            .unwrap_or_else(|| "未知学生".to_string()),
                        email: student.map(|u| u.email.clone()).unwrap_or_default(),
                    },
                    submission: sub.clone().into_submission(),
                    total_versions,
                }
            })
            .collect();

        Ok((
            items,
            PaginationInfo::new(page as i64, size as i64, total),
        ))
    }
}
