use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::FileService;
use crate::models::{ApiResponse, ErrorCode};

/// 按下载令牌取回文件：元数据在数据库，字节内容在 BlobStore
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            tracing::error!("文件查询失败: {}", e.format_simple());
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalError,
                    "File query failed",
                )),
            );
        }
    };

    let blob_store = service.get_blob_store(request);
    let content = match blob_store.get(&file_token).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            // 元数据存在但内容缺失（磁盘被清理过）
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::FileNotFound, "文件不存在")));
        }
        Err(e) => {
            tracing::error!("文件读取失败: {}", e.format_simple());
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalError,
                    "File read failed",
                )),
            );
        }
    };

    // 文件名里剔除引号与控制字符，避免破坏响应头
    let safe_name: String = db_file
        .file_name
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{safe_name}\""),
        ))
        .body(content))
}
