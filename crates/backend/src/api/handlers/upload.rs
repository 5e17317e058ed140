use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use contracts::upload::UploadResponse;

use crate::domain::upload::{service, UploadError};
use crate::shared::error::ApiError;
use crate::shared::state::SharedState;

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        UploadError::Multipart(e.body_text()).into()
    }
}

/// POST /api/uploads
///
/// Takes the multipart field `file`; other fields are ignored.
pub async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("file").to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        service::check_file(
            &file_name,
            &mime_type,
            bytes.len() as u64,
            &state.config.uploads.constraints(),
        )?;
        let stored = service::store_file(&state.uploads_dir, &file_name, &bytes).await?;

        tracing::info!("Stored upload {} ({} bytes) at {}", file_name, stored.size, stored.url);
        return Ok(Json(stored));
    }

    Err(UploadError::MissingFile.into())
}
