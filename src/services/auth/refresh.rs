use std::sync::Arc;

use tracing::debug;

use crate::errors::{AssignmentSystemError, Result};
use crate::models::auth::requests::RefreshTokenRequest;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

/// 用 refresh token 换取新的令牌对
///
/// 只接受 token_type 为 refresh 的令牌；同时回查用户记录，
/// 已注销的账号即便持有有效令牌也无法续期。
pub async fn refresh_token_pair(
    storage: &Arc<dyn Storage>,
    payload: RefreshTokenRequest,
) -> Result<RefreshTokenResponse> {
    let claims = JwtUtils::verify_refresh_token(&payload.refresh_token).map_err(|e| {
        debug!("Refresh token rejected: {}", e);
        AssignmentSystemError::authentication("刷新令牌无效或已过期")
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AssignmentSystemError::authentication("刷新令牌无效或已过期"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::authentication("用户不存在"))?;

    let token_pair = user
        .generate_token_pair()
        .map_err(AssignmentSystemError::authentication)?;

    Ok(RefreshTokenResponse {
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: JwtUtils::access_token_expiry_seconds(),
    })
}
