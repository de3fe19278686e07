//! 二进制内容存储
//!
//! 上传文件的字节内容与元数据分开存放：元数据进数据库（storage 层），
//! 字节内容通过 BlobStore 落盘。键即文件的下载令牌。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;

pub mod local;

#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    // 保存字节内容
    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;
    // 读取字节内容，不存在时返回 None
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

pub fn create_blob_store() -> Result<Arc<dyn BlobStore>> {
    let store = local::LocalBlobStore::new(&AppConfig::get().upload.dir)?;
    Ok(Arc::new(store))
}
