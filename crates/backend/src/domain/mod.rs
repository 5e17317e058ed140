pub mod chat;
pub mod parse;
pub mod upload;
