//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称；
//! 并通过 `ResponseError` 在唯一出口处把错误映射为 HTTP 响应。

use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignment_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssignmentSystemError {
            $($variant(String),)*
        }

        impl AssignmentSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignmentSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignmentSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignmentSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignmentSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignmentSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignment_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Forbidden("E007", "Permission Denied"),
    Conflict("E008", "State Conflict"),
    Authentication("E009", "Authentication Error"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
}

impl AssignmentSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为业务可预期错误（校验/权限/状态类），否则视为内部错误
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AssignmentSystemError::Validation(_)
                | AssignmentSystemError::NotFound(_)
                | AssignmentSystemError::Forbidden(_)
                | AssignmentSystemError::Conflict(_)
                | AssignmentSystemError::Authentication(_)
        )
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AssignmentSystemError::Validation(_) => StatusCode::BAD_REQUEST,
            AssignmentSystemError::NotFound(_) => StatusCode::NOT_FOUND,
            AssignmentSystemError::Forbidden(_) => StatusCode::FORBIDDEN,
            AssignmentSystemError::Conflict(_) => StatusCode::CONFLICT,
            AssignmentSystemError::Authentication(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的对外错误码
    pub fn as_error_code(&self) -> ErrorCode {
        match self {
            AssignmentSystemError::Validation(_) => ErrorCode::ValidationError,
            AssignmentSystemError::NotFound(_) => ErrorCode::NotFound,
            AssignmentSystemError::Forbidden(_) => ErrorCode::Forbidden,
            AssignmentSystemError::Conflict(_) => ErrorCode::Conflict,
            AssignmentSystemError::Authentication(_) => ErrorCode::AuthFailed,
            _ => ErrorCode::InternalError,
        }
    }
}

impl fmt::Display for AssignmentSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignmentSystemError {}

// 统一的错误出口：业务错误原样下发，内部错误在生产环境脱敏
impl actix_web::ResponseError for AssignmentSystemError {
    fn status_code(&self) -> StatusCode {
        AssignmentSystemError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        if !self.is_expected() {
            tracing::error!("{} {}", self.code(), self.format_simple());
        }

        let message = if self.is_expected() || !AppConfig::get().is_production() {
            self.message().to_string()
        } else {
            "服务器内部错误".to_string()
        };

        HttpResponse::build(AssignmentSystemError::status_code(self))
            .json(ApiResponse::<()>::error_empty(self.as_error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignmentSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssignmentSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AssignmentSystemError {
    fn from(err: std::io::Error) -> Self {
        AssignmentSystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignmentSystemError {
    fn from(err: serde_json::Error) -> Self {
        AssignmentSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AssignmentSystemError {
    fn from(err: chrono::ParseError) -> Self {
        AssignmentSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignmentSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AssignmentSystemError::database_config("test").code(), "E001");
        assert_eq!(AssignmentSystemError::validation("test").code(), "E005");
        assert_eq!(AssignmentSystemError::conflict("test").code(), "E008");
        assert_eq!(AssignmentSystemError::authentication("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AssignmentSystemError::validation("test").error_type(),
            "Validation Error"
        );
        assert_eq!(
            AssignmentSystemError::forbidden("test").error_type(),
            "Permission Denied"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AssignmentSystemError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AssignmentSystemError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AssignmentSystemError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AssignmentSystemError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!AssignmentSystemError::database_operation("x").is_expected());
        assert!(AssignmentSystemError::forbidden("x").is_expected());
    }

    #[test]
    fn test_format_simple() {
        let err = AssignmentSystemError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
