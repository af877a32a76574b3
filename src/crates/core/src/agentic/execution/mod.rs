//! Execution layer
//!
//! The dispatch loop and the two seams it talks to the user through

pub mod dispatch_loop;

pub use dispatch_loop::{DispatchLoop, LoopState, TerminationReason};

use crate::agentic::events::ConsoleEvent;
use crate::util::errors::BotResult;
use async_trait::async_trait;

/// Where turn-advance lines come from.
#[async_trait]
pub trait DirectiveSource: Send {
    /// Next line typed by the user, `None` once input is closed.
    async fn next_directive(&mut self) -> BotResult<Option<String>>;
}

/// Renders loop events for the user.
pub trait Presenter: Send + Sync {
    fn show(&self, event: ConsoleEvent);
}
