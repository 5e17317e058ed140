use super::validation::{ValidationErrors, Validator};

/// State of a single validated text field
#[derive(Debug, Clone)]
pub struct FormControl {
    value: String,
    initial: String,
    validators: Vec<Validator>,
    /// Errors set from outside (server, custom control); dropped on the next edit
    external_errors: ValidationErrors,
    touched: bool,
    dirty: bool,
}

impl FormControl {
    pub fn new(initial: impl Into<String>, validators: Vec<Validator>) -> Self {
        let initial = initial.into();
        Self {
            value: initial.clone(),
            initial,
            validators,
            external_errors: ValidationErrors::new(),
            touched: false,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Programmatic update; does not mark the control dirty
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.external_errors = ValidationErrors::new();
    }

    /// Update coming from the user typing
    pub fn input(&mut self, value: impl Into<String>) {
        self.set_value(value);
        self.dirty = true;
    }

    /// Back to the initial value, untouched and pristine
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.external_errors = ValidationErrors::new();
        self.touched = false;
        self.dirty = false;
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.external_errors = errors;
    }

    pub fn errors(&self) -> ValidationErrors {
        self.validators
            .iter()
            .filter_map(|v| v.validate(&self.value))
            .chain(self.external_errors.iter().cloned())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    pub fn mark_as_untouched(&mut self) {
        self.touched = false;
    }

    pub fn mark_as_dirty(&mut self) {
        self.dirty = true;
    }

    /// Errors are displayed only once the user interacted with the field
    pub fn should_show_errors(&self) -> bool {
        (self.touched || self.dirty) && self.is_invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ValidationError;
    use super::*;

    fn message_control() -> FormControl {
        FormControl::new("", vec![Validator::Required, Validator::MaxLength(5)])
    }

    #[test]
    fn starts_pristine_and_invalid_when_required() {
        let control = message_control();
        assert!(control.is_invalid());
        assert!(!control.touched());
        assert!(!control.dirty());
        assert!(!control.should_show_errors());
    }

    #[test]
    fn input_marks_dirty_and_revalidates() {
        let mut control = message_control();
        control.input("hello");
        assert!(control.is_valid());
        assert!(control.dirty());

        control.input("hello!");
        assert!(control.errors().has("maxlength"));
        assert!(control.should_show_errors());
    }

    #[test]
    fn external_errors_last_until_next_edit() {
        let mut control = message_control();
        control.set_value("ok");
        control.set_errors(ValidationErrors::single(ValidationError::Server(
            "boom".to_string(),
        )));
        assert!(control.errors().has("server"));
        assert!(control.is_invalid());

        control.input("ok2");
        assert!(!control.errors().has("server"));
        assert!(control.is_valid());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut control = message_control();
        control.input("abc");
        control.mark_as_touched();
        control.reset();
        assert_eq!(control.value(), "");
        assert!(!control.touched());
        assert!(!control.dirty());
    }
}
