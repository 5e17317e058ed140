//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use contracts::shared::api::ApiErrorBody;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Description of a failed request, shown to the user as a server error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status, `None` when the request never got a response
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Build from a non-2xx status and the raw response body.
    ///
    /// Backend failures carry an [`ApiErrorBody`]; anything else falls back
    /// to the status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self {
            status: Some(status),
            message,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<gloo_net::Error> for RequestError {
    fn from(e: gloo_net::Error) -> Self {
        RequestError::network(format!("Request failed: {e}"))
    }
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/parse");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Turn a response into `T`, or into a [`RequestError`] for non-2xx statuses
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, RequestError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(RequestError::from_status(status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| RequestError::network(format!("Failed to parse response: {e}")))
}

/// POST a JSON body and decode the JSON answer
pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, RequestError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let resp = Request::post(&api_url(path))
        .header("Accept", "application/json")
        .json(body)?
        .send()
        .await?;
    read_json(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_api_body() {
        let err = RequestError::from_status(422, r#"{"status":422,"message":"URL is not valid"}"#);
        assert_eq!(err.status, Some(422));
        assert_eq!(err.message, "URL is not valid");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let err = RequestError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(RequestError::network("offline").status, None);
    }
}
