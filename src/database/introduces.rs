use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::IntroduceDocument;
use crate::error::AppError;

/// Persistence seam for introduce entries.
#[async_trait]
pub trait IntroduceStore: Send + Sync {
    /// Insert or overwrite the entry keyed by its id.
    async fn save(&self, doc: &IntroduceDocument) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<IntroduceDocument>, AppError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<IntroduceDocument>, AppError>;
    async fn find_all(&self) -> Result<Vec<IntroduceDocument>, AppError>;
    /// Returns whether a record was actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgIntroduceStore {
    pool: PgPool,
}

impl PgIntroduceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "id, title, description, tag, image_id, url, created_at, modified_at, status";

#[async_trait]
impl IntroduceStore for PgIntroduceStore {
    async fn save(&self, doc: &IntroduceDocument) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO introduce
                (id, title, description, tag, image_id, url, created_at, modified_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                tag = EXCLUDED.tag,
                image_id = EXCLUDED.image_id,
                url = EXCLUDED.url,
                modified_at = EXCLUDED.modified_at,
                status = EXCLUDED.status
            "#,
        )
        .bind(doc.id)
        .bind(doc.title.as_str())
        .bind(doc.description.as_deref())
        .bind(doc.tag.as_deref())
        .bind(doc.image_id)
        .bind(doc.url.as_deref())
        .bind(doc.created_at)
        .bind(doc.modified_at)
        .bind(doc.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IntroduceDocument>, AppError> {
        let doc = sqlx::query_as::<_, IntroduceDocument>(&format!(
            "SELECT {SELECT_COLUMNS} FROM introduce WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<IntroduceDocument>, AppError> {
        let doc = sqlx::query_as::<_, IntroduceDocument>(&format!(
            "SELECT {SELECT_COLUMNS} FROM introduce WHERE title = $1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_all(&self) -> Result<Vec<IntroduceDocument>, AppError> {
        let docs = sqlx::query_as::<_, IntroduceDocument>(&format!(
            "SELECT {SELECT_COLUMNS} FROM introduce"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM introduce WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
