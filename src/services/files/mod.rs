pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blobstore::BlobStore;
use crate::storage::Storage;

pub struct FileService {
    storage: Option<Arc<dyn Storage>>,
    blob_store: Option<Arc<dyn BlobStore>>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            blob_store: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_blob_store(&self, request: &HttpRequest) -> Arc<dyn BlobStore> {
        if let Some(blob_store) = &self.blob_store {
            blob_store.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn BlobStore>>>()
                .expect("BlobStore not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传单个文件，返回可填入 FILE 作业提交载荷的文件描述
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    // 按下载令牌取回文件内容
    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        file_token: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, file_token).await
    }
}
