//! Chat message form (MVVM Standard)
//!
//! Structure:
//! - model.rs: ChatFormModel - pure form state and submit rules
//! - view.rs: ChatForm component (textarea, send/stop buttons, auto-resize)

mod model;
mod view;

pub use model::ChatFormModel;
pub use view::ChatForm;
