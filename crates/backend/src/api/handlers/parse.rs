use axum::{extract::State, Json};
use contracts::parse::{ParseFormData, ParseResult};

use crate::domain::parse::service;
use crate::shared::error::ApiError;
use crate::shared::state::SharedState;

/// POST /api/parse
pub async fn parse(
    State(state): State<SharedState>,
    Json(data): Json<ParseFormData>,
) -> Result<Json<ParseResult>, ApiError> {
    let result = service::parse_page(&state.http, &data).await?;
    tracing::info!(
        "Parsed {}: {} headings, {} links",
        result.url,
        result.headings.len(),
        result.links_count
    );
    Ok(Json(result))
}
