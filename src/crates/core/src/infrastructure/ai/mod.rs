//! Model gateway
//!
//! One request/response exchange with the language-model service per turn.
//! Gateways never retry: any failure is reported as `BotError::Gateway`.

pub mod client;
pub mod types;

pub use client::OpenAiGateway;

use crate::agentic::core::ConversationState;
use crate::agentic::tools::ActionSpec;
use crate::service::config::{BotConfig, ReasoningEffort};
use crate::util::errors::BotResult;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallDirective {
    pub name: String,
    /// JSON text exactly as the model sent it; may be malformed
    pub raw_arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    Text(String),
    FunctionCall(FunctionCallDirective),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub model: String,
    pub reasoning: ReasoningEffort,
    pub max_output_tokens: u32,
}

impl From<&BotConfig> for GenerationParams {
    fn from(config: &BotConfig) -> Self {
        Self {
            model: config.model.clone(),
            reasoning: config.reasoning,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends the whole conversation and the full capability list.
    ///
    /// Specs are serialized on every call, never cached between turns.
    async fn converse(
        &self,
        state: &ConversationState,
        specs: &[ActionSpec],
        params: &GenerationParams,
    ) -> BotResult<ModelReply>;
}
