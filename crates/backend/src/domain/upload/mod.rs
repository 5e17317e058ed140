pub mod service;

pub use service::UploadError;
