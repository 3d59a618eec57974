use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use crate::database::models::ImageDocument;
use crate::error::AppError;
use crate::services::FileUpload;
use crate::state::AppState;

/// POST /api/v1/image/upload - multipart upload with a `file` part.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageDocument>, AppError> {
    let file = read_file_part(&mut multipart).await?;
    let doc = state.images.save(file).await?;
    Ok(Json(doc))
}

/// GET /api/v1/image/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ImageDocument>, AppError> {
    let doc = state.images.get_by_id(id).await?;
    Ok(Json(doc))
}

/// GET /api/v1/image/all - full listing, no pagination.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<ImageDocument>>, AppError> {
    let docs = state.images.list_all().await?;
    Ok(Json(docs))
}

/// DELETE /api/v1/image/:id
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.images.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pull the `file` part out of a multipart body, if present.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<FileUpload>, AppError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read file: {e}")))?;
            file = Some(FileUpload {
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }
    Ok(file)
}
