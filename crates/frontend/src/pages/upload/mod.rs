//! Upload Page UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: multipart upload call
//! - view_model.rs: UploadPageVm with RwSignals
//! - view.rs: Main component UploadPage

mod model;
mod view;
mod view_model;

pub use view::UploadPage;
pub use view_model::UploadPageVm;
