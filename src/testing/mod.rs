//! In-memory store implementations for service-level tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::images::ImageStore;
use crate::database::introduces::IntroduceStore;
use crate::database::models::{ImageDocument, IntroduceDocument};
use crate::error::AppError;

#[derive(Default)]
pub struct MemoryImageStore {
    items: Mutex<HashMap<Uuid, ImageDocument>>,
}

impl MemoryImageStore {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.lock().unwrap().contains_key(&id)
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn insert(&self, doc: &ImageDocument) -> Result<(), AppError> {
        self.items.lock().unwrap().insert(doc.id, doc.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageDocument>, AppError> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ImageDocument>, AppError> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.items.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryIntroduceStore {
    items: Mutex<HashMap<Uuid, IntroduceDocument>>,
}

impl MemoryIntroduceStore {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl IntroduceStore for MemoryIntroduceStore {
    async fn save(&self, doc: &IntroduceDocument) -> Result<(), AppError> {
        self.items.lock().unwrap().insert(doc.id, doc.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IntroduceDocument>, AppError> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<IntroduceDocument>, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .find(|doc| doc.title == title)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<IntroduceDocument>, AppError> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.items.lock().unwrap().remove(&id).is_some())
    }
}
