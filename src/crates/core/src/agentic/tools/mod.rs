//! Game action system
//!
//! Action contracts, the fixed registry and the concrete executors

pub mod framework;
pub mod implementations;
pub mod registry;

pub use framework::{
    ActionKind, ActionOutcome, ActionSpec, GameAction, ParamSpec, ParamType, ValidatedArguments,
};
pub use registry::{get_global_registry, ActionRegistry, RegisteredAction};
