//! File picker that behaves like a form control (MVVM Standard)
//!
//! Structure:
//! - model.rs: FileInputModel - selection validation, written values, errors
//! - view.rs: FileInput component wrapping the native `<input type="file">`

mod model;
mod view;

pub use model::{FileInputModel, FileInputValue, SelectedFileMeta};
pub use view::FileInput;
