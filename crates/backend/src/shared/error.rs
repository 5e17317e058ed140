use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::ApiErrorBody;
use thiserror::Error;

use crate::domain::parse::ParseError;
use crate::domain::upload::UploadError;
use crate::shared::llm::LlmError;

/// Error returned by handlers, rendered as `(status, Json(ApiErrorBody))`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} {}", status.as_u16(), self);
        } else {
            tracing::warn!("{} {}", status.as_u16(), self);
        }
        let body = ApiErrorBody::new(status.as_u16(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::InvalidUrl(_) => ApiError::Unprocessable(e.to_string()),
            ParseError::Upstream { .. } | ParseError::Fetch(_) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::MissingFile | UploadError::Multipart(_) => ApiError::BadRequest(e.to_string()),
            UploadError::TooLarge(rejected) => ApiError::PayloadTooLarge(rejected.message),
            UploadError::Rejected(rejected) => ApiError::Unprocessable(rejected.message),
            UploadError::Io(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidRequest(_) => ApiError::BadRequest(e.to_string()),
            _ => ApiError::BadGateway(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::upload::UploadFileError;

    #[test]
    fn test_parse_errors_map_to_status() {
        let err: ApiError = ParseError::InvalidUrl("ftp://x".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = ParseError::Upstream {
            status: 404,
            url: "https://example.com".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_rejected_upload_status() {
        let too_big = UploadError::TooLarge(UploadFileError::new(
            "a.png",
            "Your file exceeds 5MB. Upload a smaller image.",
        ));
        assert_eq!(ApiError::from(too_big).status(), StatusCode::PAYLOAD_TOO_LARGE);

        let wrong_type = UploadError::Rejected(UploadFileError::new(
            "a.pdf",
            "Image should be in .png format.",
        ));
        let err = ApiError::from(wrong_type);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Image should be in .png format.");
    }
}
