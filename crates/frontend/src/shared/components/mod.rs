pub mod chat_form;
pub mod field_error;
pub mod file_input;
pub mod parse_form;
