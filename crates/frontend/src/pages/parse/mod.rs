//! Parse Page UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: API call to the parse endpoint
//! - view_model.rs: ParsePageVm with RwSignals
//! - view.rs: Main component ParsePage

mod model;
mod view;
mod view_model;

pub use view::ParsePage;
pub use view_model::ParsePageVm;
