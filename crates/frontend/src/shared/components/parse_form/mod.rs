//! URL form of the parse page (MVVM Standard)
//!
//! Structure:
//! - model.rs: ParseFormModel - URL control, server error injection
//! - view.rs: ParseForm component

mod model;
mod view;

pub use model::ParseFormModel;
pub use view::ParseForm;
