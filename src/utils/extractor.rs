//! 路径参数安全提取器
//!
//! 路径中的 ID 在进入业务层之前统一解析为 i64，
//! 解析失败直接返回 400 + 统一错误结构，避免每个 handler 重复判断。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_param(param: &'static str) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        format!("invalid path parameter: {param}"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("路径参数 {param} 必须是有效的正整数"),
        )),
    )
    .into()
}

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| bad_path_param($param));
                ready(parsed)
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_i64_extractor!(SafeSubmissionIdI64, "submission_id");

/// 下载令牌提取器：仅接受 UUID 风格的字符集，阻止路径穿越
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("token")
            .filter(|raw| {
                !raw.is_empty()
                    && raw.len() <= 64
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
            .map(|raw| SafeFileToken(raw.to_string()))
            .ok_or_else(|| bad_path_param("token"));
        ready(parsed)
    }
}
