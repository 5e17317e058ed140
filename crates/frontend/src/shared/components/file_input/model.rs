//! File Input - Model
//!
//! State of the file picker as a form control: the displayed file name, the
//! last validation failure and the limits a selected file must respect.

use crate::shared::forms::{FormControl, ValidationError, ValidationErrors, Validator};
use contracts::upload::{parse_file_name_from_url, validate_file, FileConstraints, UploadFileError};

/// Value propagated to the enclosing form
#[derive(Debug, Clone)]
pub struct FileInputValue {
    /// Object URL of a freshly selected file, or the URL written into the control
    pub path: String,
    pub file_name: String,
    /// The selected file; `None` when the value came from a URL
    pub file: Option<web_sys::File>,
}

/// What validation needs to know about a picked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FileInputModel {
    /// Name shown in the text field
    pub select_file_name: FormControl,
    pub upload_file_error: Option<UploadFileError>,
    pub constraints: FileConstraints,
    /// Object URL created for the current selection
    object_url: Option<String>,
}

impl FileInputModel {
    pub fn new(constraints: FileConstraints) -> Self {
        Self {
            select_file_name: FormControl::new("", vec![Validator::Required]),
            upload_file_error: None,
            constraints,
            object_url: None,
        }
    }

    /// Validate a picked file.
    ///
    /// On failure the error is recorded and the displayed name cleared; on
    /// success the error is dropped and the file name displayed.
    pub fn select(&mut self, file: &SelectedFileMeta) -> Result<(), UploadFileError> {
        match validate_file(&file.name, &file.mime_type, file.size, &self.constraints) {
            Ok(()) => {
                self.upload_file_error = None;
                self.select_file_name.set_value(file.name.clone());
                Ok(())
            }
            Err(error) => {
                self.upload_file_error = Some(error.clone());
                self.select_file_name.set_value("");
                Err(error)
            }
        }
    }

    /// Populate from a stored URL; the displayed name is its trailing segment.
    ///
    /// A non-empty URL replaces the current selection, so its object URL is
    /// handed back for revocation.
    pub fn write_value(&mut self, url: Option<&str>) -> Option<String> {
        let url = url.filter(|u| !u.is_empty());
        let file_name = url.map(parse_file_name_from_url).unwrap_or_default();
        self.select_file_name.set_value(file_name);
        url.and_then(|_| self.object_url.take())
    }

    /// Remember the object URL of a new selection; returns the one it replaces
    pub fn replace_object_url(&mut self, url: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.object_url, url)
    }

    pub fn file_name(&self) -> &str {
        self.select_file_name.value()
    }

    /// Errors reported to the enclosing form
    pub fn validate(&self) -> Option<ValidationErrors> {
        self.upload_file_error
            .as_ref()
            .map(|e| ValidationErrors::single(ValidationError::Custom(e.message.clone())))
    }

    /// Mirror the touched flag of the enclosing control
    pub fn sync_touched(&mut self, touched: bool) {
        if touched {
            self.select_file_name.mark_as_touched();
        } else {
            self.select_file_name.mark_as_untouched();
        }
    }

    /// Message for the field: the upload failure first, then display errors
    pub fn error_message(&self) -> Option<String> {
        if let Some(error) = &self.upload_file_error {
            return Some(error.message.clone());
        }
        self.select_file_name
            .should_show_errors()
            .then(|| self.select_file_name.errors().first().map(|e| e.message()))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FileInputModel {
        FileInputModel::new(FileConstraints {
            accepted_types: Some(".png,.jpeg".to_string()),
            max_file_size: Some(1.0),
        })
    }

    fn meta(name: &str, mime_type: &str, size: u64) -> SelectedFileMeta {
        SelectedFileMeta {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }

    #[test]
    fn oversized_file_records_error_and_clears_name() {
        let mut m = model();
        m.select(&meta("ok.png", "image/png", 10)).unwrap();
        assert_eq!(m.file_name(), "ok.png");

        let err = m.select(&meta("huge.png", "image/png", 2 * 1024 * 1024)).unwrap_err();
        assert_eq!(err.file_name, "huge.png");
        assert_eq!(m.upload_file_error, Some(err));
        assert_eq!(m.file_name(), "");

        let errors = m.validate().unwrap();
        assert_eq!(
            errors.get("custom").map(|e| e.message()),
            Some("Your file exceeds 1MB. Upload a smaller image.".to_string())
        );
    }

    #[test]
    fn accepted_file_keeps_original_name() {
        let mut m = model();
        assert!(m.select(&meta("Holiday Photo.jpeg", "image/jpeg", 1024)).is_ok());
        assert_eq!(m.file_name(), "Holiday Photo.jpeg");
        assert!(m.upload_file_error.is_none());
        assert!(m.validate().is_none());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let mut m = model();
        let err = m.select(&meta("notes.txt", "text/plain", 10)).unwrap_err();
        assert_eq!(err.message, "Image should be in .png,.jpeg format.");
        assert_eq!(m.error_message(), Some(err.message));
    }

    #[test]
    fn written_url_sets_display_name() {
        let mut m = model();
        m.write_value(Some("http://localhost:3000/uploads/1f2e/cover.png"));
        assert_eq!(m.file_name(), "cover.png");

        m.write_value(None);
        assert_eq!(m.file_name(), "");
    }

    #[test]
    fn written_url_releases_previous_object_url() {
        let mut m = model();
        assert_eq!(m.replace_object_url(Some("blob:first".to_string())), None);
        assert_eq!(
            m.replace_object_url(Some("blob:second".to_string())),
            Some("blob:first".to_string())
        );

        // Clearing the value keeps the selection's URL alive
        assert_eq!(m.write_value(None), None);
        assert_eq!(
            m.write_value(Some("http://localhost:3000/uploads/1f2e/cover.png")),
            Some("blob:second".to_string())
        );
        assert_eq!(m.replace_object_url(None), None);
    }

    #[test]
    fn required_error_shows_only_when_touched() {
        let mut m = model();
        assert_eq!(m.error_message(), None);
        m.sync_touched(true);
        assert_eq!(m.error_message(), Some("This field is required".to_string()));
        m.sync_touched(false);
        assert_eq!(m.error_message(), None);
    }
}
