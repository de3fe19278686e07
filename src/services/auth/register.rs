use std::sync::Arc;

use tracing::info;

use crate::errors::{AssignmentSystemError, Result};
use crate::models::auth::requests::RegisterRequest;
use crate::models::auth::responses::AuthResponse;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate;

/// 注册新用户并签发首组令牌对
pub async fn register_user(
    storage: &Arc<dyn Storage>,
    payload: RegisterRequest,
) -> Result<AuthResponse> {
    // 1. 校验输入
    validate::validate_name(&payload.name).map_err(AssignmentSystemError::validation)?;
    validate::validate_email(payload.email.trim()).map_err(AssignmentSystemError::validation)?;
    let password_check = validate::validate_password(&payload.password);
    if !password_check.is_valid {
        return Err(AssignmentSystemError::validation(
            password_check.error_message(),
        ));
    }

    // 2. 邮箱统一转小写入库，重复邮箱由唯一约束在存储层转为 Conflict
    let email = payload.email.trim().to_lowercase();
    let password_hash = hash_password(&payload.password)?;
    let user = storage
        .create_user(payload.name.trim(), &email, &password_hash, payload.role)
        .await?;

    info!("New {} registered: {}", user.role, user.email);

    // 3. 签发令牌对
    let token_pair = user
        .generate_token_pair()
        .map_err(AssignmentSystemError::authentication)?;

    Ok(AuthResponse {
        user,
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: JwtUtils::access_token_expiry_seconds(),
    })
}
