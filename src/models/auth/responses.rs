use serde::Serialize;

use crate::models::users::entities::User;

// 注册/登录成功响应：用户信息 + 双令牌
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// access token 有效期（秒）
    pub expires_in: i64,
}

// 刷新令牌响应
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

// 当前用户信息响应
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}
