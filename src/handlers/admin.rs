use axum::extract::{Multipart, Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{IntroduceDocument, Status};
use crate::error::AppError;
use crate::services::{FileUpload, IntroduceCreateRequest, IntroduceUpdateRequest};
use crate::state::AppState;

/// POST /api/v1/admin/introduce - multipart: text fields plus a `file` part.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IntroduceDocument>, AppError> {
    let form = IntroduceForm::read(&mut multipart).await?;
    let request = IntroduceCreateRequest {
        title: form.require_title()?,
        description: form.description,
        tag: form.tag,
        url: form.url,
    };

    let doc = state.introduces.create(request, form.file).await?;
    Ok(Json(doc))
}

/// PUT /api/v1/admin/introduce/:id - multipart, `file` part optional.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<IntroduceDocument>, AppError> {
    let form = IntroduceForm::read(&mut multipart).await?;
    let request = IntroduceUpdateRequest {
        title: form.require_title()?,
        description: form.description,
        tag: form.tag,
        url: form.url,
        status: form.status,
    };

    let doc = state.introduces.update(id, request, form.file).await?;
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: Status,
}

/// PUT /api/v1/admin/introduce/:id/status?status=ACTIVE|INACTIVE
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<StatusParams>,
) -> Result<Json<IntroduceDocument>, AppError> {
    let doc = state.introduces.update_status(id, params.status).await?;
    Ok(Json(doc))
}

/// DELETE /api/v1/admin/introduce/:id - returns the removed entry.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntroduceDocument>, AppError> {
    let doc = state.introduces.delete(id).await?;
    Ok(Json(doc))
}

#[derive(Debug, Default)]
struct IntroduceForm {
    title: Option<String>,
    description: Option<String>,
    tag: Option<String>,
    url: Option<String>,
    status: Option<Status>,
    file: Option<FileUpload>,
}

impl IntroduceForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("multipart error: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let content_type = field.content_type().map(|s| s.to_string());
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("failed to read file: {e}")))?;
                    form.file = Some(FileUpload {
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                Some("title") => form.title = Some(read_text(field).await?),
                Some("description") => form.description = Some(read_text(field).await?),
                Some("tag") => form.tag = Some(read_text(field).await?),
                Some("url") => form.url = Some(read_text(field).await?),
                Some("status") => {
                    let text = read_text(field).await?;
                    let status = text
                        .parse::<Status>()
                        .map_err(|e| AppError::Validation(e.to_string()))?;
                    form.status = Some(status);
                }
                _ => {} // ignore unknown parts
            }
        }

        Ok(form)
    }

    fn require_title(&self) -> Result<String, AppError> {
        self.title
            .clone()
            .ok_or_else(|| AppError::Validation("title is required".to_string()))
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read field: {e}")))
}
