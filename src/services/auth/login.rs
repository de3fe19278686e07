use std::sync::Arc;

use tracing::info;

use crate::errors::{AssignmentSystemError, Result};
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::AuthResponse;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

/// 校验邮箱与密码，成功则返回用户信息与新令牌对
pub async fn login_user(storage: &Arc<dyn Storage>, payload: LoginRequest) -> Result<AuthResponse> {
    let email = payload.email.trim().to_lowercase();

    // 账号不存在与密码错误返回同一提示，不暴露邮箱是否注册
    let user = storage
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AssignmentSystemError::authentication("邮箱或密码错误"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AssignmentSystemError::authentication("邮箱或密码错误"));
    }

    let token_pair = user
        .generate_token_pair()
        .map_err(AssignmentSystemError::authentication)?;

    info!("User {} logged in successfully", user.email);

    Ok(AuthResponse {
        user,
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: JwtUtils::access_token_expiry_seconds(),
    })
}
