pub mod service;

pub use service::ParseError;
