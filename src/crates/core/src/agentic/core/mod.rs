//! Core data model module
//!
//! Conversation turns and the append-only session history

pub mod message;
pub mod session;

pub use message::{MessageRole, Turn};
pub use session::ConversationState;
