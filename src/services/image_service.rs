use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::database::images::ImageStore;
use crate::database::models::ImageDocument;
use crate::error::AppError;

/// An uploaded file as received from a multipart request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ImageStore>,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    /// Encode and persist an upload. Rejects absent or empty files.
    pub async fn save(&self, upload: Option<FileUpload>) -> Result<ImageDocument, AppError> {
        let upload = upload
            .ok_or_else(|| AppError::Validation("file is empty or not provided".to_string()))?;
        if upload.bytes.is_empty() {
            return Err(AppError::Validation(
                "file is empty or not provided".to_string(),
            ));
        }

        let doc = ImageDocument {
            id: Uuid::new_v4(),
            content_type: upload.content_type,
            base64: STANDARD.encode(&upload.bytes),
        };
        self.store.insert(&doc).await?;
        Ok(doc)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ImageDocument, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("image not found with id: {id}")))
    }

    pub async fn list_all(&self) -> Result<Vec<ImageDocument>, AppError> {
        self.store.find_all().await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("image not found with id: {id}")));
        }
        Ok(())
    }
}
