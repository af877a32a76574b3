// MMO Bot Core Library - conversation loop, game actions and model access
// Four-layer architecture: Util -> Service -> Infrastructure -> Agentic

pub mod agentic; // Agentic layer - conversation state, action system, dispatch loop
pub mod infrastructure; // Infrastructure layer - model gateway clients and wire types
pub mod service; // Service layer - runtime configuration
pub mod util; // Utility layer - errors

// Export main types
pub use util::errors::*;

// Export service layer components
pub use service::config::{BotConfig, ReasoningEffort};

// Export infrastructure components
pub use infrastructure::ai::{
    FunctionCallDirective, GenerationParams, ModelGateway, ModelReply, OpenAiGateway,
};

// Export Agentic core types
pub use agentic::{
    core::{ConversationState, Turn},
    events::ConsoleEvent,
    execution::{DirectiveSource, DispatchLoop, LoopState, Presenter, TerminationReason},
    tools::{ActionKind, ActionOutcome, ActionSpec, GameAction, ParamSpec, ParamType},
};

// Export ActionRegistry separately
pub use agentic::tools::registry::ActionRegistry;
