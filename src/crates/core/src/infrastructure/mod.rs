//! Infrastructure layer
//!
//! Model service access

pub mod ai;

pub use ai::{ModelGateway, OpenAiGateway};
