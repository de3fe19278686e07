//! 本地磁盘实现

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::BlobStore;
use crate::errors::{AssignmentSystemError, Result};

pub struct LocalBlobStore {
    dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            AssignmentSystemError::file_operation(format!("创建上传目录失败: {e}"))
        })?;
        Ok(Self { dir })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.bin"))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        tokio::fs::write(self.blob_path(key), data)
            .await
            .map_err(|e| AssignmentSystemError::file_operation(format!("写入文件失败: {e}")))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AssignmentSystemError::file_operation(format!(
                "读取文件失败: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = std::env::temp_dir().join(format!("blobstore-test-{}", std::process::id()));
        let store = LocalBlobStore::new(&dir).unwrap();

        store.put("test-key", b"hello blob").await.unwrap();
        let data = store.get("test-key").await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"hello blob"[..]));

        let missing = store.get("no-such-key").await.unwrap();
        assert!(missing.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
