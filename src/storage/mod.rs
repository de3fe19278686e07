use std::sync::Arc;

use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    evaluations::entities::Feedback,
    files::entities::File,
    submissions::{
        entities::Submission, requests::CreateSubmissionRequest,
        responses::StudentLatestSubmission,
    },
    users::entities::{User, UserRole},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password_hash 为已经哈希过的密码）
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 作业管理方法
    // 创建作业（初始为未发布）
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 教师视角：列出自己的作业（全部发布状态）
    async fn list_assignments_by_teacher(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)>;
    // 学生视角：列出全部已发布作业
    async fn list_published_assignments(
        &self,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)>;
    // 更新作业字段（业务规则在服务层校验，这里只执行补丁）
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 设置发布状态
    async fn set_assignment_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 统计某作业的提交数量（发布锁判断依据）
    async fn count_submissions_for_assignment(&self, assignment_id: i64) -> Result<u64>;

    /// 提交管理方法
    // 创建提交：版本号 = 当前最大版本 + 1，
    // 依赖 (assignment_id, student_id, version) 唯一索引兜底并发冲突
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: &CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取学生对某作业的最新提交（最高版本）
    async fn get_latest_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 学生的提交历史（跨作业，按提交时间倒序，分页）
    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Submission>, PaginationInfo)>;
    // 学生对某作业的全部版本（版本倒序）
    async fn list_submission_versions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>>;
    // 某作业的全部提交（按学生分组，组内版本倒序）
    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    // 教师花名册视图：每个学生只保留最高版本，按提交时间倒序，分页
    async fn list_latest_per_student(
        &self,
        assignment_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<StudentLatestSubmission>, PaginationInfo)>;

    /// 评阅管理方法
    // 一次性评阅：SUBMITTED -> EVALUATED 状态转移 + 创建评语，单事务完成；
    // 提交已是 EVALUATED 时返回 Conflict
    async fn evaluate_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        score: f64,
        comments: &str,
    ) -> Result<(Submission, Feedback)>;
    // 获取提交的评语
    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>>;
    // 修改评语文本（分数不经此路径变更）
    async fn update_feedback_comments(
        &self,
        submission_id: i64,
        comments: &str,
    ) -> Result<Option<Feedback>>;

    /// 文件管理方法
    // 记录上传文件的元数据
    async fn create_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
