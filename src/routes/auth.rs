use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    AUTH_SERVICE.register(payload.into_inner(), &req).await
}

pub async fn login(req: HttpRequest, payload: web::Json<LoginRequest>) -> Result<HttpResponse> {
    AUTH_SERVICE.login(payload.into_inner(), &req).await
}

pub async fn refresh_token(
    req: HttpRequest,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    AUTH_SERVICE.refresh_token(payload.into_inner(), &req).await
}

pub async fn profile(request: HttpRequest) -> Result<HttpResponse> {
    AUTH_SERVICE.profile(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route(
                "/register",
                web::post()
                    .to(register)
                    .wrap(middlewares::RateLimit::register()),
            )
            .route(
                "/login",
                web::post().to(login).wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/refresh",
                web::post()
                    .to(refresh_token)
                    .wrap(middlewares::RateLimit::refresh_token()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/profile", web::get().to(profile)),
            ),
    );
}
