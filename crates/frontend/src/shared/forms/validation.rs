use regex::Regex;

/// A single validation failure on a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    MaxLength { required: usize, actual: usize },
    Pattern { pattern: String },
    /// Pushed in from a failed request
    Server(String),
    /// Raised by a custom control (e.g. the file input)
    Custom(String),
}

impl ValidationError {
    /// Stable key, one error per key on a control
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::Required => "required",
            ValidationError::MaxLength { .. } => "maxlength",
            ValidationError::Pattern { .. } => "pattern",
            ValidationError::Server(_) => "server",
            ValidationError::Custom(_) => "custom",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationError::Required => "This field is required".to_string(),
            ValidationError::MaxLength { required, actual } => {
                format!("Must be at most {required} characters ({actual} entered)")
            }
            ValidationError::Pattern { .. } => "Invalid format".to_string(),
            ValidationError::Server(message) | ValidationError::Custom(message) => {
                message.clone()
            }
        }
    }
}

/// Errors of one control, in insertion order, unique by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.insert(error);
        errors
    }

    /// Insert or replace the error with the same key
    pub fn insert(&mut self, error: ValidationError) {
        match self.0.iter_mut().find(|e| e.key() == error.key()) {
            Some(existing) => *existing = error,
            None => self.0.push(error),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.key() == key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub enum Validator {
    /// Non-empty after trimming whitespace
    Required,
    /// At most `n` characters
    MaxLength(usize),
    /// Whole value must match; empty values pass (pair with `Required`)
    Pattern(Regex),
}

impl Validator {
    pub fn validate(&self, value: &str) -> Option<ValidationError> {
        match self {
            Validator::Required => value.trim().is_empty().then_some(ValidationError::Required),
            Validator::MaxLength(max) => {
                let actual = value.chars().count();
                (actual > *max).then_some(ValidationError::MaxLength {
                    required: *max,
                    actual,
                })
            }
            Validator::Pattern(regex) => {
                (!value.is_empty() && !regex.is_match(value)).then(|| ValidationError::Pattern {
                    pattern: regex.as_str().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(Validator::Required.validate(""), Some(ValidationError::Required));
        assert_eq!(Validator::Required.validate("  \n"), Some(ValidationError::Required));
        assert_eq!(Validator::Required.validate("a"), None);
    }

    #[test]
    fn max_length_counts_chars() {
        let v = Validator::MaxLength(3);
        assert_eq!(v.validate("абв"), None);
        assert_eq!(
            v.validate("abcd"),
            Some(ValidationError::MaxLength {
                required: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn pattern_skips_empty_value() {
        let v = Validator::Pattern(Regex::new("^a+$").unwrap());
        assert_eq!(v.validate(""), None);
        assert_eq!(v.validate("aaa"), None);
        assert_eq!(v.validate("b").map(|e| e.key()), Some("pattern"));
    }

    #[test]
    fn errors_are_unique_by_key() {
        let mut errors = ValidationErrors::new();
        errors.insert(ValidationError::Server("first".into()));
        errors.insert(ValidationError::Required);
        errors.insert(ValidationError::Server("second".into()));
        assert_eq!(errors.iter().count(), 2);
        assert_eq!(errors.get("server").map(|e| e.message()), Some("second".to_string()));
        assert_eq!(errors.first(), Some(&ValidationError::Server("second".into())));
    }
}
