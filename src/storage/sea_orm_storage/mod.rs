//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod feedbacks;
mod files;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{AssignmentSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例（数据库地址来自配置）
    pub async fn new_async() -> Result<Self> {
        Self::new_with_url(&AppConfig::get().database.url).await
    }

    /// 用指定数据库地址创建存储实例（测试用内存库也走这里）
    pub async fn new_with_url(url: &str) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url).await?
        } else {
            Self::connect_generic(&db_url).await?
        };

        // 运行迁移
        Migrator::up(&db, None).await.map_err(|e| {
            AssignmentSystemError::database_operation(format!("数据库迁移失败: {e}"))
        })?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let config = AppConfig::get();

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| {
                AssignmentSystemError::database_config(format!("SQLite URL 解析失败: {e}"))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库每个连接都是独立数据库，必须收敛到单连接
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.database.pool_size
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                AssignmentSystemError::database_connection(format!("SQLite 连接失败: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str) -> Result<DatabaseConnection> {
        let config = AppConfig::get();

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            AssignmentSystemError::database_connection(format!("无法连接到数据库: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssignmentSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        self.create_user_impl(name, email, password_hash, role)
            .await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_teacher(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        self.list_assignments_by_teacher_impl(teacher_id, page, size)
            .await
    }

    async fn list_published_assignments(
        &self,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        self.list_published_assignments_impl(page, size).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn set_assignment_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Assignment>> {
        self.set_assignment_published_impl(id, is_published).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn count_submissions_for_assignment(&self, assignment_id: i64) -> Result<u64> {
        self.count_submissions_for_assignment_impl(assignment_id)
            .await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: &CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, req, is_late)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_latest_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_latest_submission_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Submission>, PaginationInfo)> {
        self.list_submissions_by_student_impl(student_id, page, size)
            .await
    }

    async fn list_submission_versions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_submission_versions_impl(assignment_id, student_id)
            .await
    }

    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_assignment_submissions_impl(assignment_id).await
    }

    async fn list_latest_per_student(
        &self,
        assignment_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<StudentLatestSubmission>, PaginationInfo)> {
        self.list_latest_per_student_impl(assignment_id, page, size)
            .await
    }

    // 评阅模块
    async fn evaluate_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        score: f64,
        comments: &str,
    ) -> Result<(Submission, Feedback)> {
        self.evaluate_submission_impl(submission_id, teacher_id, score, comments)
            .await
    }

    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_submission_impl(submission_id).await
    }

    async fn update_feedback_comments(
        &self,
        submission_id: i64,
        comments: &str,
    ) -> Result<Option<Feedback>> {
        self.update_feedback_comments_impl(submission_id, comments)
            .await
    }

    // 文件模块
    async fn create_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_impl(download_token, file_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }
}
