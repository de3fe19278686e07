use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    // 文件的唯一下载标识
    pub download_token: String,
    // 原始文件名
    pub file_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // MIME 类型
    pub file_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    // 上传者 ID
    pub user_id: i64,
}
