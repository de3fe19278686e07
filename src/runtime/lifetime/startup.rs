use std::sync::Arc;

use tracing::warn;

use crate::blobstore::BlobStore;
use crate::config::AppConfig;
use crate::storage::Storage;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub blob_store: Arc<dyn BlobStore>,
}

/// 准备服务器启动的上下文
/// 包括存储后端与上传文件的落盘目录
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let blob_store = crate::blobstore::create_blob_store().expect("Failed to create blob store");
    warn!(
        "Upload blob store initialized at {}",
        AppConfig::get().upload.dir
    );

    StartupContext {
        storage,
        blob_store,
    }
}
