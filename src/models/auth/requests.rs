use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 用户注册请求
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// 姓名
    pub name: String,
    /// 邮箱（登录凭据，保存前统一转为小写）
    pub email: String,
    /// 密码
    pub password: String,
    /// 角色：teacher 或 student
    pub role: UserRole,
}

// 用户登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 邮箱
    pub email: String,
    /// 密码
    pub password: String,
}

// 刷新令牌请求
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}
