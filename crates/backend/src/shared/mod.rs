pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod state;
