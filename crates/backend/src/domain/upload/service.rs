use contracts::upload::{fit_in_size, validate_file, FileConstraints, UploadFileError, UploadResponse};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Multipart field 'file' is missing")]
    MissingFile,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("{0}")]
    TooLarge(UploadFileError),

    #[error("{0}")]
    Rejected(UploadFileError),

    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

/// Apply the same checks as the file input
pub fn check_file(
    file_name: &str,
    mime_type: &str,
    size: u64,
    constraints: &FileConstraints,
) -> Result<(), UploadError> {
    validate_file(file_name, mime_type, size, constraints).map_err(|e| {
        if fit_in_size(size, constraints.max_file_size) {
            UploadError::Rejected(e)
        } else {
            UploadError::TooLarge(e)
        }
    })
}

/// File name safe to use as a path segment and in a URL.
///
/// Directory parts are dropped, characters outside `[A-Za-z0-9._-]` become
/// `_` and leading dots are removed.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Store the bytes under `{dir}/{uuid}/{sanitized name}`
pub async fn store_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<UploadResponse, UploadError> {
    let id = Uuid::new_v4();
    let safe_name = sanitize_file_name(file_name);

    let folder = dir.join(id.to_string());
    tokio::fs::create_dir_all(&folder).await?;
    tokio::fs::write(folder.join(&safe_name), bytes).await?;

    Ok(UploadResponse {
        url: format!("/uploads/{}/{}", id, safe_name),
        file_name: safe_name,
        size: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> FileConstraints {
        FileConstraints {
            accepted_types: Some(".png,.jpeg,.gif,.webp".to_string()),
            max_file_size: Some(1.0),
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(r"C:\Users\me\my cat.jpeg"), "my_cat.jpeg");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("фото.png"), "____.png");
        assert_eq!(sanitize_file_name("dir/"), "file");
    }

    #[test]
    fn test_check_file_classifies_errors() {
        assert!(check_file("a.png", "image/png", 1024, &images()).is_ok());
        assert!(matches!(
            check_file("a.png", "image/png", 2 * 1024 * 1024, &images()),
            Err(UploadError::TooLarge(_))
        ));
        assert!(matches!(
            check_file("a.pdf", "application/pdf", 1024, &images()),
            Err(UploadError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_store_file() {
        let dir = std::env::temp_dir().join(format!("parsechat-test-{}", Uuid::new_v4()));
        let stored = store_file(&dir, "my image.png", b"png-bytes").await.unwrap();

        assert_eq!(stored.file_name, "my_image.png");
        assert_eq!(stored.size, 9);
        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.url.ends_with("/my_image.png"));

        let relative = stored.url.trim_start_matches("/uploads/");
        let contents = tokio::fs::read(dir.join(relative)).await.unwrap();
        assert_eq!(contents, b"png-bytes");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
