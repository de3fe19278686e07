/*!
 * JWT 认证中间件
 *
 * 验证 Access Token 并把对应的用户记录放进请求扩展，
 * 后续 handler 通过 `RequireJWT::extract_user_claims` 系列函数读取。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件提取并验证 JWT 令牌（必须是 access 类型）
 * 3. 令牌有效则查询用户记录，存入请求扩展，继续处理请求
 * 4. 失败时返回 401，错误码区分三种情况：
 *    - 缺少令牌 -> MISSING_TOKEN
 *    - 令牌过期 -> TOKEN_EXPIRED
 *    - 其余（签名/格式/类型错误、用户不存在）-> INVALID_TOKEN
 */

use crate::errors::AssignmentSystemError;
use crate::models::users::entities::UserRole;
use crate::models::{ErrorCode, users::entities};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT access token，返回 (错误码, 提示) 供响应使用
async fn extract_and_validate_jwt(
    req: &ServiceRequest,
) -> Result<entities::User, (ErrorCode, String)> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| (ErrorCode::MissingToken, "缺少认证令牌".to_string()))?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                (ErrorCode::TokenExpired, "认证令牌已过期".to_string())
            }
            _ => (ErrorCode::InvalidToken, "无效的认证令牌".to_string()),
        }
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| (ErrorCode::InvalidToken, "无效的认证令牌".to_string()))?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("查询令牌用户失败: {}", e);
            (ErrorCode::InvalidToken, "无效的认证令牌".to_string())
        })?
        .ok_or_else(|| (ErrorCode::InvalidToken, "用户不存在".to_string()))?;

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::AuthFailed, "")
                        .map_into_right_body(),
                ));
            }

            // 验证 JWT token
            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err((code, message)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, code, &message)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取完整用户记录
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<entities::User>()
            .map(|user| user.role)
    }

    /// 提取当前用户，缺失时返回认证错误（供 handler 用 `?` 链式处理）
    pub fn current_user(
        req: &actix_web::HttpRequest,
    ) -> Result<entities::User, AssignmentSystemError> {
        Self::extract_user_claims(req)
            .ok_or_else(|| AssignmentSystemError::authentication("无法获取用户信息"))
    }
}
