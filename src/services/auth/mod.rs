pub mod login;
pub mod refresh;
pub mod register;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::models::auth::responses::UserInfoResponse;
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
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

    // 用户注册
    pub async fn register(
        &self,
        payload: RegisterRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let response = register::register_user(&storage, payload).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(response, "注册成功")))
    }

    // 登录验证
    pub async fn login(
        &self,
        payload: LoginRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let response = login::login_user(&storage, payload).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "登录成功")))
    }

    // 刷新令牌
    pub async fn refresh_token(
        &self,
        payload: RefreshTokenRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let storage = self.get_storage(request);
        let response = refresh::refresh_token_pair(&storage, payload).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "令牌刷新成功")))
    }

    // 获取当前用户信息
    pub async fn profile(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let user = RequireJWT::current_user(request)?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "获取用户信息成功",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssignmentSystemError;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn test_storage() -> Arc<dyn Storage> {
        Arc::new(
            SeaOrmStorage::new_with_url("sqlite::memory:")
                .await
                .expect("in-memory storage"),
        )
    }

    fn register_payload(email: &str, role: UserRole) -> RegisterRequest {
        RegisterRequest {
            name: "张小明".to_string(),
            email: email.to_string(),
            password: "passw0rd123".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_lowercases_email_and_issues_tokens() {
        let storage = test_storage().await;
        let response = register::register_user(
            &storage,
            register_payload("Student@Example.COM", UserRole::Student),
        )
        .await
        .unwrap();

        assert_eq!(response.user.email, "student@example.com");
        assert_eq!(response.user.role, UserRole::Student);
        assert!(!response.access_token.is_empty());
        assert!(!response.refresh_token.is_empty());
        assert!(response.expires_in > 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let storage = test_storage().await;
        register::register_user(&storage, register_payload("dup@example.com", UserRole::Student))
            .await
            .unwrap();

        let err = register::register_user(
            &storage,
            register_payload("DUP@example.com", UserRole::Teacher),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let storage = test_storage().await;
        let mut payload = register_payload("weak@example.com", UserRole::Student);
        payload.password = "short1".to_string();
        let err = register::register_user(&storage, payload).await.unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_and_refresh_flow() {
        let storage = test_storage().await;
        register::register_user(&storage, register_payload("flow@example.com", UserRole::Teacher))
            .await
            .unwrap();

        // 凭据正确（大小写不同的邮箱也应命中同一账号）
        let auth = login::login_user(
            &storage,
            LoginRequest {
                email: "Flow@Example.com".to_string(),
                password: "passw0rd123".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(auth.user.email, "flow@example.com");

        // 刷新令牌换新令牌对
        let refreshed = refresh::refresh_token_pair(
            &storage,
            RefreshTokenRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
        assert!(!refreshed.access_token.is_empty());

        // access token 不能用于刷新
        let err = refresh::refresh_token_pair(
            &storage,
            RefreshTokenRequest {
                refresh_token: auth.access_token,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let storage = test_storage().await;
        register::register_user(&storage, register_payload("auth@example.com", UserRole::Student))
            .await
            .unwrap();

        let err = login::login_user(
            &storage,
            LoginRequest {
                email: "auth@example.com".to_string(),
                password: "wrongpass9".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Authentication(_)));

        // 不存在的邮箱得到与密码错误相同的响应
        let err = login::login_user(
            &storage,
            LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "passw0rd123".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Authentication(_)));
    }
}
