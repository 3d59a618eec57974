use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded image, stored base64-encoded. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ImageDocument {
    pub id: Uuid,
    pub content_type: Option<String>,
    pub base64: String,
}
