use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::ImageDocument;
use crate::error::AppError;

/// Persistence seam for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn insert(&self, doc: &ImageDocument) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageDocument>, AppError>;
    async fn find_all(&self) -> Result<Vec<ImageDocument>, AppError>;
    /// Returns whether a record was actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    async fn insert(&self, doc: &ImageDocument) -> Result<(), AppError> {
        sqlx::query("INSERT INTO images (id, content_type, base64) VALUES ($1, $2, $3)")
            .bind(doc.id)
            .bind(doc.content_type.as_deref())
            .bind(doc.base64.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageDocument>, AppError> {
        let doc = sqlx::query_as::<_, ImageDocument>(
            "SELECT id, content_type, base64 FROM images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_all(&self) -> Result<Vec<ImageDocument>, AppError> {
        let docs =
            sqlx::query_as::<_, ImageDocument>("SELECT id, content_type, base64 FROM images")
                .fetch_all(&self.pool)
                .await?;
        Ok(docs)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
