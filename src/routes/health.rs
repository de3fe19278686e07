use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::ApiResponse;

#[derive(Debug, Serialize)]
struct HealthStatus {
    timestamp: chrono::DateTime<chrono::Utc>,
    environment: String,
    version: &'static str,
}

// 存活探针，不要求认证
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        HealthStatus {
            timestamp: chrono::Utc::now(),
            environment: AppConfig::get().app.environment.clone(),
            version: env!("CARGO_PKG_VERSION"),
        },
        "Server is healthy",
    ))
}

// 配置路由
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
