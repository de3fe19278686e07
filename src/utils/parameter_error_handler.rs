//! 请求参数解析错误处理
//!
//! Json / Query 反序列化失败时返回统一的 400 错误结构，
//! 自定义枚举反序列化器里的中文提示会原样出现在 message 中。

use actix_web::{HttpRequest, HttpResponse, error};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        error::JsonPayloadError::Deserialize(e) => format!("请求体格式错误: {e}"),
        error::JsonPayloadError::ContentType => "请求体必须是 application/json".to_string(),
        error::JsonPayloadError::Overflow { .. } | error::JsonPayloadError::OverflowKnownLength { .. } => {
            "请求体过大".to_string()
        }
        other => format!("请求体解析失败: {other}"),
    };

    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            message,
        )),
    )
    .into()
}

pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("查询参数格式错误: {err}");

    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            message,
        )),
    )
    .into()
}
