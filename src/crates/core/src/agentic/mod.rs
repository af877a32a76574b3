//! Agentic layer
//!
//! Conversation state, the game action system and the dispatch loop that ties
//! them to the model gateway

pub mod core;
pub mod events;
pub mod execution;
pub mod tools;
