//! Event Layer
//!
//! Everything the dispatch loop wants shown to the user, decoupled from how
//! the terminal renders it

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    /// Session header
    SessionStarted { model: String, reasoning: String },
    /// Executor narration
    Action { narration: String },
    FunctionRequested { name: String, arguments: Value },
    ModelText { content: String },
    ArgumentParseFailed { message: String },
    ArgumentAdjusted { action: String, message: String },
    UnknownFunction { name: String },
    GatewayFailed { message: String },
    InputFailed { message: String },
    Exiting,
    Interrupted,
}

impl ConsoleEvent {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ArgumentParseFailed { .. }
                | Self::UnknownFunction { .. }
                | Self::GatewayFailed { .. }
                | Self::InputFailed { .. }
        )
    }
}
