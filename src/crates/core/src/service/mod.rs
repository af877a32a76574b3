//! Service layer
//!
//! Runtime configuration built once at startup

pub mod config;

pub use config::{BotConfig, ReasoningEffort};
