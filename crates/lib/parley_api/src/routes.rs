//! Route paths.

pub const POST_CHAT: &str = "/chat";
pub const GET_PING: &str = "/ping";
pub const GET_CHECK_OPENAI: &str = "/check-openai";
