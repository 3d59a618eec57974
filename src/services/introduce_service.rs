use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::introduces::IntroduceStore;
use crate::database::models::{IntroduceDocument, Status};
use crate::error::AppError;
use crate::services::image_service::{FileUpload, ImageService};

#[derive(Debug, Clone, Deserialize)]
pub struct IntroduceCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub url: Option<String>,
}

/// Update payload. `title` is required and always rewritten; the remaining
/// fields only overwrite the stored entry when present.
#[derive(Debug, Clone, Deserialize)]
pub struct IntroduceUpdateRequest {
    pub title: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub url: Option<String>,
    pub status: Option<Status>,
}

#[derive(Clone)]
pub struct IntroduceService {
    store: Arc<dyn IntroduceStore>,
    images: ImageService,
}

impl IntroduceService {
    pub fn new(store: Arc<dyn IntroduceStore>, images: ImageService) -> Self {
        Self { store, images }
    }

    /// Store the image, then the entry. There is no transactional rollback:
    /// if persisting the entry fails the image record stays behind.
    pub async fn create(
        &self,
        request: IntroduceCreateRequest,
        file: Option<FileUpload>,
    ) -> Result<IntroduceDocument, AppError> {
        let image = self.images.save(file).await?;

        let now = Utc::now();
        let doc = IntroduceDocument {
            id: Uuid::new_v4(),
            title: request.title.to_uppercase(),
            description: request.description,
            tag: request.tag,
            image_id: image.id,
            url: request.url,
            created_at: now,
            modified_at: now,
            status: Status::default(),
        };
        self.store.save(&doc).await?;
        Ok(doc)
    }

    /// Full listing: entries tagged "Production" (case-insensitive) first,
    /// ties broken by case-insensitive title.
    pub async fn list_all(&self) -> Result<Vec<IntroduceDocument>, AppError> {
        let mut docs = self.store.find_all().await?;
        order_listing(&mut docs);
        Ok(docs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<IntroduceDocument, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("introduce not found with id: {id}")))
    }

    /// Lookup by title. Titles are stored uppercase, so the input is
    /// normalized the same way first.
    pub async fn get_by_title(&self, title: &str) -> Result<IntroduceDocument, AppError> {
        let title = title.to_uppercase();
        self.store
            .find_by_title(&title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("introduce not found with title: {title}")))
    }

    /// Rewrites the title (uppercased), swaps in a freshly stored image when
    /// one is supplied (the previous image record is left behind), and applies
    /// any remaining present fields.
    pub async fn update(
        &self,
        id: Uuid,
        request: IntroduceUpdateRequest,
        file: Option<FileUpload>,
    ) -> Result<IntroduceDocument, AppError> {
        let mut doc = self.get_by_id(id).await?;

        doc.title = request.title.to_uppercase();

        if let Some(file) = file {
            let image = self.images.save(Some(file)).await?;
            doc.image_id = image.id;
        }

        if let Some(description) = request.description {
            doc.description = Some(description);
        }
        if let Some(tag) = request.tag {
            doc.tag = Some(tag);
        }
        if let Some(url) = request.url {
            doc.url = Some(url);
        }
        if let Some(status) = request.status {
            doc.status = status;
        }
        doc.modified_at = Utc::now();

        self.store.save(&doc).await?;
        Ok(doc)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<IntroduceDocument, AppError> {
        let mut doc = self.get_by_id(id).await?;
        doc.status = status;
        doc.modified_at = Utc::now();
        self.store.save(&doc).await?;
        Ok(doc)
    }

    /// Removes the entry and returns it. The associated image is not deleted.
    pub async fn delete(&self, id: Uuid) -> Result<IntroduceDocument, AppError> {
        let doc = self.get_by_id(id).await?;
        self.store.delete(id).await?;
        Ok(doc)
    }
}

fn order_listing(docs: &mut [IntroduceDocument]) {
    docs.sort_by_key(|doc| (!is_production(doc), doc.title.to_lowercase()));
}

fn is_production(doc: &IntroduceDocument) -> bool {
    doc.tag
        .as_deref()
        .is_some_and(|tag| tag.eq_ignore_ascii_case("Production"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryImageStore, MemoryIntroduceStore};

    fn service() -> (IntroduceService, Arc<MemoryIntroduceStore>, Arc<MemoryImageStore>) {
        let image_store = Arc::new(MemoryImageStore::default());
        let store = Arc::new(MemoryIntroduceStore::default());
        let images = ImageService::new(image_store.clone());
        (
            IntroduceService::new(store.clone(), images),
            store,
            image_store,
        )
    }

    fn upload() -> FileUpload {
        FileUpload {
            content_type: Some("image/jpeg".to_string()),
            bytes: b"jpeg bytes".to_vec(),
        }
    }

    fn create_request(title: &str, tag: Option<&str>) -> IntroduceCreateRequest {
        IntroduceCreateRequest {
            title: title.to_string(),
            description: Some("a description".to_string()),
            tag: tag.map(str::to_string),
            url: Some("https://example.com".to_string()),
        }
    }

    fn update_request(title: &str) -> IntroduceUpdateRequest {
        IntroduceUpdateRequest {
            title: title.to_string(),
            description: None,
            tag: None,
            url: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_uppercases_title_and_defaults_to_active() {
        let (service, _, image_store) = service();

        let doc = service
            .create(create_request("launch", Some("Other")), Some(upload()))
            .await
            .unwrap();

        assert_eq!(doc.title, "LAUNCH");
        assert_eq!(doc.status, Status::Active);
        assert_eq!(image_store.len(), 1);

        let fetched = service.get_by_id(doc.id).await.unwrap();
        assert_eq!(fetched.title, "LAUNCH");
    }

    #[tokio::test]
    async fn create_without_file_is_a_validation_error() {
        let (service, store, _) = service();

        let err = service
            .create(create_request("launch", None), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn list_all_orders_production_first_then_title() {
        let (service, _, _) = service();
        service
            .create(create_request("B", Some("Production")), Some(upload()))
            .await
            .unwrap();
        service
            .create(create_request("A", Some("Other")), Some(upload()))
            .await
            .unwrap();
        service
            .create(create_request("C", Some("production")), Some(upload()))
            .await
            .unwrap();

        let titles: Vec<String> = service
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.title)
            .collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn list_all_breaks_title_ties_case_insensitively() {
        let (service, _, _) = service();
        for title in ["delta", "alpha", "charlie"] {
            service
                .create(create_request(title, None), Some(upload()))
                .await
                .unwrap();
        }

        let titles: Vec<String> = service
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.title)
            .collect();
        assert_eq!(titles, vec!["ALPHA", "CHARLIE", "DELTA"]);
    }

    #[tokio::test]
    async fn get_by_title_normalizes_case() {
        let (service, _, _) = service();
        let created = service
            .create(create_request("launch", None), Some(upload()))
            .await
            .unwrap();

        let found = service.get_by_title("launch").await.unwrap();
        assert_eq!(found.id, created.id);

        let err = service.get_by_title("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let (service, _, _) = service();

        let err = service.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_preserves_omitted_fields() {
        let (service, _, _) = service();
        let doc = service
            .create(create_request("original", Some("Other")), Some(upload()))
            .await
            .unwrap();
        service
            .update_status(doc.id, Status::Inactive)
            .await
            .unwrap();

        let updated = service
            .update(doc.id, update_request("renamed"), None)
            .await
            .unwrap();

        assert_eq!(updated.title, "RENAMED");
        assert_eq!(updated.description.as_deref(), Some("a description"));
        assert_eq!(updated.tag.as_deref(), Some("Other"));
        assert_eq!(updated.url.as_deref(), Some("https://example.com"));
        // status omitted from the payload stays as it was
        assert_eq!(updated.status, Status::Inactive);
        assert_eq!(updated.image_id, doc.image_id);
    }

    #[tokio::test]
    async fn update_applies_present_fields() {
        let (service, _, _) = service();
        let doc = service
            .create(create_request("original", None), Some(upload()))
            .await
            .unwrap();

        let request = IntroduceUpdateRequest {
            title: "renamed".to_string(),
            description: Some("new description".to_string()),
            tag: Some("Production".to_string()),
            url: Some("https://example.org".to_string()),
            status: Some(Status::Inactive),
        };
        let updated = service.update(doc.id, request, None).await.unwrap();

        assert_eq!(updated.description.as_deref(), Some("new description"));
        assert_eq!(updated.tag.as_deref(), Some("Production"));
        assert_eq!(updated.url.as_deref(), Some("https://example.org"));
        assert_eq!(updated.status, Status::Inactive);
    }

    #[tokio::test]
    async fn update_with_new_image_leaves_old_record_behind() {
        let (service, _, image_store) = service();
        let doc = service
            .create(create_request("original", None), Some(upload()))
            .await
            .unwrap();
        let old_image_id = doc.image_id;

        let updated = service
            .update(doc.id, update_request("original"), Some(upload()))
            .await
            .unwrap();

        assert_ne!(updated.image_id, old_image_id);
        // the replaced image is orphaned, not removed
        assert_eq!(image_store.len(), 2);
        assert!(image_store.contains(old_image_id));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let (service, _, _) = service();

        let err = service
            .update(Uuid::new_v4(), update_request("whatever"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_overwrites_only_status() {
        let (service, _, _) = service();
        let doc = service
            .create(create_request("original", Some("Other")), Some(upload()))
            .await
            .unwrap();

        let updated = service
            .update_status(doc.id, Status::Inactive)
            .await
            .unwrap();

        assert_eq!(updated.status, Status::Inactive);
        assert_eq!(updated.title, "ORIGINAL");
        assert_eq!(updated.tag.as_deref(), Some("Other"));
    }

    #[tokio::test]
    async fn delete_returns_entry_and_keeps_image() {
        let (service, store, image_store) = service();
        let doc = service
            .create(create_request("doomed", None), Some(upload()))
            .await
            .unwrap();

        let removed = service.delete(doc.id).await.unwrap();

        assert_eq!(removed.id, doc.id);
        assert_eq!(store.len(), 0);
        // soft foreign key: the image survives its owner
        assert!(image_store.contains(doc.image_id));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let (service, _, _) = service();

        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
