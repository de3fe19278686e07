use serde::Serialize;

/// 文件上传响应：客户端把 url/name/size 填入 FILE 作业的提交载荷
#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    /// 下载地址
    pub url: String,
    /// 下载标识
    pub download_token: String,
    /// 原始文件名
    pub name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// MIME 类型
    pub content_type: String,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
