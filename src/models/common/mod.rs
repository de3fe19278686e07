pub mod pagination;
pub mod response;

/// 应用启动时间，用于健康检查的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
