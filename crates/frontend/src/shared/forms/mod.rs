//! Form primitives used by the form components.
//!
//! A [`FormControl`] is a plain value: the view model keeps it inside a
//! signal, and all validation runs through pure [`Validator`]s, so the form
//! logic is testable without a browser.

mod control;
mod validation;

pub use control::FormControl;
pub use validation::{ValidationError, ValidationErrors, Validator};
