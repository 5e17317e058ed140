//! Types shared between the browser client and the backend.
//!
//! Everything here is plain data plus pure validation, so both sides agree on
//! what a valid chat message, URL or upload looks like.

pub mod chat;
pub mod parse;
pub mod shared;
pub mod upload;
