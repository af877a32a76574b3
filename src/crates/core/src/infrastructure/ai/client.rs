use super::types::openai::{extract_api_error_message, OpenAIChatRequest, OpenAIChatResponse};
use super::{GenerationParams, ModelGateway, ModelReply};
use crate::agentic::core::ConversationState;
use crate::agentic::tools::ActionSpec;
use crate::service::config::BotConfig;
use crate::util::errors::{BotError, BotResult};
use async_trait::async_trait;
use log::{debug, error, trace};
use reqwest::Client;
use serde_json::Value;

/// Chat-completions client with legacy function calling.
///
/// No timeout is configured: a hung service blocks the session until the
/// user interrupts it.
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGateway {
    pub fn new(config: &BotConfig) -> BotResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("mmo-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn converse(
        &self,
        state: &ConversationState,
        specs: &[ActionSpec],
        params: &GenerationParams,
    ) -> BotResult<ModelReply> {
        let request = OpenAIChatRequest::build(state.turns(), specs, params);
        debug!(
            "Sending chat request: session_id={}, model={}, turns={}, functions={}",
            state.session_id(),
            params.model,
            request.messages.len(),
            request.functions.len()
        );
        trace!(
            "OpenAI request body: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                error!("{}", error_msg);
                BotError::gateway(error_msg)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response body: {}", e);
            error!("{}", error_msg);
            BotError::gateway(error_msg)
        })?;
        trace!("OpenAI response: status={}, body={}", status, body);

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| extract_api_error_message(&json))
                .unwrap_or_else(|| body.clone());
            let error_msg = format!("Service returned {}: {}", status, detail);
            error!("{}", error_msg);
            return Err(BotError::gateway(error_msg));
        }

        let parsed: OpenAIChatResponse = serde_json::from_str(&body).map_err(|e| {
            let error_msg = format!("Malformed response: {}, data: {}", e, body);
            error!("{}", error_msg);
            BotError::gateway(error_msg)
        })?;
        if let Some(usage) = parsed.usage_summary() {
            debug!("Token usage: {}", usage);
        }

        parsed.into_model_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAiGateway;
    use crate::service::config::BotConfig;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let config = BotConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..BotConfig::default()
        };
        let gateway = OpenAiGateway::new(&config).unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
