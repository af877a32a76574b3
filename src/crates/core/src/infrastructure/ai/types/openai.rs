use crate::agentic::core::Turn;
use crate::agentic::tools::ActionSpec;
use crate::infrastructure::ai::{FunctionCallDirective, GenerationParams, ModelReply};
use crate::util::errors::{BotError, BotResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FUNCTION_CALL_MODE_AUTO: &str = "auto";

#[derive(Debug, Serialize, PartialEq)]
pub struct OpenAIMessage {
    pub role: &'static str,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Turn> for OpenAIMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role().as_str(),
            content: turn.content(),
            name: turn.name().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OpenAIFunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ActionSpec> for OpenAIFunctionDefinition {
    fn from(spec: &ActionSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            parameters: spec.parameters_schema(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub functions: Vec<OpenAIFunctionDefinition>,
    pub function_call: &'static str,
    pub max_completion_tokens: u32,
    pub reasoning_effort: &'static str,
}

impl OpenAIChatRequest {
    pub fn build(turns: &[Turn], specs: &[ActionSpec], params: &GenerationParams) -> Self {
        Self {
            model: params.model.clone(),
            messages: turns.iter().map(OpenAIMessage::from).collect(),
            functions: specs.iter().map(OpenAIFunctionDefinition::from).collect(),
            function_call: FUNCTION_CALL_MODE_AUTO,
            max_completion_tokens: params.max_output_tokens,
            reasoning_effort: params.reasoning.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[allow(dead_code)]
    #[serde(default)]
    index: usize,
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    role: Option<String>,
    content: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize, Clone)]
struct FunctionCall {
    name: Option<String>,
    arguments: Option<String>,
}

impl From<FunctionCall> for FunctionCallDirective {
    fn from(call: FunctionCall) -> Self {
        Self {
            name: call.name.unwrap_or_default(),
            raw_arguments: call.arguments.unwrap_or_else(|| "{}".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChatResponse {
    #[allow(dead_code)]
    id: Option<String>,
    #[allow(dead_code)]
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<OpenAIUsage>,
}

impl OpenAIChatResponse {
    pub fn usage_summary(&self) -> Option<String> {
        self.usage.as_ref().map(|usage| {
            format!(
                "prompt_tokens={}, completion_tokens={}, total_tokens={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            )
        })
    }

    /// Only the first choice is considered; a function call wins over text.
    pub fn into_model_reply(self) -> BotResult<ModelReply> {
        let Some(first_choice) = self.choices.into_iter().next() else {
            return Err(BotError::gateway("Model response contained no choices"));
        };

        let Choice {
            message,
            finish_reason,
            ..
        } = first_choice;
        log::debug!("OpenAI finish_reason: {:?}", finish_reason);

        match message.function_call {
            Some(function_call) => Ok(ModelReply::FunctionCall(function_call.into())),
            None => Ok(ModelReply::Text(message.content.unwrap_or_default())),
        }
    }
}

/// Pulls the service-reported message out of an error body.
pub fn extract_api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    if let Some(message) = error.get("message").and_then(|value| value.as_str()) {
        return Some(message.to_string());
    }
    if let Some(message) = error.as_str() {
        return Some(message.to_string());
    }
    Some("The model service reported an error".to_string())
}
