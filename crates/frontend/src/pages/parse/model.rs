//! Parse Page - Model (API functions)

use crate::shared::api_utils::{post_json, RequestError};
use contracts::parse::{ParseFormData, ParseResult};

/// Ask the backend to fetch and summarize a page
pub async fn parse_url(data: &ParseFormData) -> Result<ParseResult, RequestError> {
    post_json("/api/parse", data).await
}
