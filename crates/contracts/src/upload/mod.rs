//! Upload contracts and the file checks shared by the file input and the
//! upload endpoint.

use serde::{Deserialize, Serialize};

const BYTES_IN_MB: f64 = 1024.0 * 1024.0;

/// A selected file failed size or type validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFileError {
    pub file_name: String,
    pub message: String,
}

impl UploadFileError {
    pub fn new(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UploadFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

/// Limits applied to a selected file. Both limits are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConstraints {
    /// Accepted extensions as written by the caller, e.g. `".png,.jpeg"`
    pub accepted_types: Option<String>,
    /// Maximum size in megabytes
    pub max_file_size: Option<f64>,
}

/// Response of `POST /api/uploads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Server-relative URL of the stored file
    pub url: String,
    pub file_name: String,
    pub size: u64,
}

pub fn fit_in_size(size_bytes: u64, max_file_size_mb: Option<f64>) -> bool {
    match max_file_size_mb {
        Some(max) => size_bytes as f64 <= max * BYTES_IN_MB,
        None => true,
    }
}

/// Extension derived from the MIME subtype: `image/jpeg` -> `.jpeg`.
///
/// No mapping to conventional extensions is done, so a `.jpg`-only accept
/// list rejects `image/jpeg`.
pub fn extension_from_mime(mime_type: &str) -> Option<String> {
    mime_type
        .split('/')
        .nth(1)
        .filter(|subtype| !subtype.is_empty())
        .map(|subtype| format!(".{subtype}"))
}

/// Validate a file against the constraints.
///
/// Size is checked first. The type check is a substring test of the derived
/// extension against the accepted-types string.
pub fn validate_file(
    file_name: &str,
    mime_type: &str,
    size_bytes: u64,
    constraints: &FileConstraints,
) -> Result<(), UploadFileError> {
    if !fit_in_size(size_bytes, constraints.max_file_size) {
        let max = constraints.max_file_size.unwrap_or_default();
        return Err(UploadFileError::new(
            file_name,
            format!("Your file exceeds {max}MB. Upload a smaller image."),
        ));
    }
    if let Some(accepted) = constraints.accepted_types.as_deref().filter(|a| !a.is_empty()) {
        let accepted_ext = extension_from_mime(mime_type)
            .map(|ext| accepted.contains(&ext))
            .unwrap_or(false);
        if !accepted_ext {
            return Err(UploadFileError::new(
                file_name,
                format!("Image should be in {accepted} format."),
            ));
        }
    }
    Ok(())
}

/// Display name for a stored file: the trailing path segment of its URL,
/// without query or fragment, percent-decoded.
pub fn parse_file_name_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let path = without_fragment.split('?').next().unwrap_or(without_fragment);
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
