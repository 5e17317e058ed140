//! Chat Page UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: streaming completion request against the backend
//! - in_flight.rs: InFlight - generation guard for the running stream
//! - session.rs: ChatSession - conversation and connection state transitions
//! - view_model.rs: ChatPageVm with signals, stream lifecycle, persistence
//! - view.rs: Main component ChatPage

mod in_flight;
mod model;
mod session;
mod view;
mod view_model;

pub use session::{ChatEntry, ChatSession};
pub use view::ChatPage;
pub use view_model::ChatPageVm;
