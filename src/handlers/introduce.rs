use axum::extract::{Path, State};
use axum::response::Json;
use uuid::Uuid;

use crate::database::models::IntroduceDocument;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/v1/introduce/all - public listing, production entries first.
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<IntroduceDocument>>, AppError> {
    let docs = state.introduces.list_all().await?;
    Ok(Json(docs))
}

/// GET /api/v1/introduce/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntroduceDocument>, AppError> {
    let doc = state.introduces.get_by_id(id).await?;
    Ok(Json(doc))
}

/// GET /api/v1/introduce/by-title/:title
pub async fn get_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<IntroduceDocument>, AppError> {
    let doc = state.introduces.get_by_title(&title).await?;
    Ok(Json(doc))
}
