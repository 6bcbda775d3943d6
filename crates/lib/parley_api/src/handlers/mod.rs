//! Request handlers.

pub mod chat;
pub mod check;
pub mod ping;
