//! Parse Form - Model

use crate::shared::api_utils::RequestError;
use crate::shared::forms::{FormControl, ValidationError, ValidationErrors, Validator};
use contracts::parse::{ParseFormData, HTTP_URL_REGEX};

#[derive(Debug, Clone)]
pub struct ParseFormModel {
    pub url: FormControl,
}

impl ParseFormModel {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            url: FormControl::new(
                initial_url,
                vec![Validator::Required, Validator::Pattern(HTTP_URL_REGEX.clone())],
            ),
        }
    }

    /// Show a failed request as a `server` error on the URL field
    pub fn apply_server_error(&mut self, error: &RequestError) {
        self.url
            .set_errors(ValidationErrors::single(ValidationError::Server(error.message.clone())));
        self.url.mark_as_touched();
    }

    /// Confirm action: the form value when valid, otherwise `None` with the
    /// field marked touched so its errors become visible
    pub fn submit(&mut self) -> Option<ParseFormData> {
        if self.url.is_invalid() {
            self.url.mark_as_touched();
            return None;
        }
        Some(ParseFormData {
            url: self.url.value().to_string(),
        })
    }

    pub fn error_message(&self) -> Option<String> {
        self.url
            .should_show_errors()
            .then(|| self.url.errors().first().map(|e| e.message()))
            .flatten()
    }
}

impl Default for ParseFormModel {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_keeps_form_invalid() {
        let mut form = ParseFormModel::default();
        assert_eq!(form.submit(), None);
        assert!(form.url.touched());
        assert_eq!(form.error_message(), Some("This field is required".to_string()));

        form.url.input("not a url");
        assert!(form.url.errors().has("pattern"));
        assert_eq!(form.submit(), None);
        assert_eq!(form.error_message(), Some("Invalid format".to_string()));
    }

    #[test]
    fn valid_url_is_emitted() {
        let mut form = ParseFormModel::new("https://example.com/page");
        assert_eq!(
            form.submit(),
            Some(ParseFormData {
                url: "https://example.com/page".to_string()
            })
        );
    }

    #[test]
    fn server_error_is_attached_to_url_control() {
        let mut form = ParseFormModel::new("https://example.com");
        form.apply_server_error(&RequestError {
            status: Some(502),
            message: "Upstream returned 404".to_string(),
        });
        assert_eq!(
            form.url.errors().get("server"),
            Some(&ValidationError::Server("Upstream returned 404".to_string()))
        );
        assert_eq!(form.submit(), None);
        assert_eq!(form.error_message(), Some("Upstream returned 404".to_string()));

        // Editing the field clears the server error
        form.url.input("https://example.org");
        assert!(form.submit().is_some());
    }
}
