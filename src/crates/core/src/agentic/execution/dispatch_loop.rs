//! Dispatch loop
//!
//! `AwaitingUserDirective -> QueryingModel -> {ExecutingAction | EmittingText}
//! -> AwaitingUserDirective`, until an exit directive, a gateway failure or an
//! interrupt moves it to `Terminated`.
//!
//! Every transition appends at most one complete turn, so abandoning the loop
//! at any await point never leaves a partial turn behind.

use super::{DirectiveSource, Presenter};
use crate::agentic::core::ConversationState;
use crate::agentic::events::ConsoleEvent;
use crate::agentic::tools::ActionRegistry;
use crate::infrastructure::ai::{FunctionCallDirective, GenerationParams, ModelGateway, ModelReply};
use crate::service::config::BotConfig;
use crate::util::errors::{BotError, BotResult};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// User typed exit or quit
    UserExit,
    /// Input stream reached end of file
    InputClosed,
    /// Reading the next directive failed
    InputFailed(String),
    GatewayFailure(String),
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingUserDirective,
    QueryingModel,
    ExecutingAction(FunctionCallDirective),
    EmittingText,
    Terminated(TerminationReason),
}

impl LoopState {
    /// States whose completion finishes a turn
    fn completes_turn(&self) -> bool {
        matches!(self, Self::ExecutingAction(_) | Self::EmittingText)
    }
}

pub fn is_exit_directive(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

/// Parses function-call arguments; anything but a JSON object (or nothing) is an error.
pub fn parse_arguments(raw: &str) -> BotResult<Map<String, Value>> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(BotError::argument_parse(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(BotError::argument_parse(e.to_string())),
    }
}

pub struct DispatchLoop<'r, G, S, P> {
    config: BotConfig,
    gateway: G,
    source: S,
    presenter: P,
    registry: &'r ActionRegistry,
    conversation: ConversationState,
    state: LoopState,
    gateway_calls: usize,
}

impl<'r, G, S, P> DispatchLoop<'r, G, S, P>
where
    G: ModelGateway,
    S: DirectiveSource,
    P: Presenter,
{
    pub fn new(
        config: BotConfig,
        gateway: G,
        source: S,
        presenter: P,
        registry: &'r ActionRegistry,
    ) -> Self {
        let conversation = ConversationState::new(config.system_prompt.clone());
        Self {
            config,
            gateway,
            source,
            presenter,
            registry,
            conversation,
            state: LoopState::AwaitingUserDirective,
            gateway_calls: 0,
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_calls(&self) -> usize {
        self.gateway_calls
    }

    /// Drives the loop to `Terminated`, pausing `turn_delay` after every completed turn.
    pub async fn run(&mut self, cancel: CancellationToken) -> TerminationReason {
        info!(
            "Dispatch loop started: session_id={}, model={}, reasoning={}",
            self.conversation.session_id(),
            self.config.model,
            self.config.reasoning
        );
        self.presenter.show(ConsoleEvent::SessionStarted {
            model: self.config.model.clone(),
            reasoning: self.config.reasoning.to_string(),
        });

        loop {
            if let LoopState::Terminated(reason) = &self.state {
                info!(
                    "Dispatch loop terminated: session_id={}, reason={:?}, turns={}",
                    self.conversation.session_id(),
                    reason,
                    self.conversation.len()
                );
                return reason.clone();
            }

            let completing_turn = self.state.completes_turn();
            let interrupted = tokio::select! {
                biased;
                _ = cancel.cancelled() => true,
                _ = self.step() => false,
            };
            if interrupted {
                self.interrupt();
                continue;
            }

            if completing_turn && !self.config.turn_delay.is_zero() {
                let interrupted = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => true,
                    _ = tokio::time::sleep(self.config.turn_delay) => false,
                };
                if interrupted {
                    self.interrupt();
                }
            }
        }
    }

    fn interrupt(&mut self) {
        warn!("Dispatch loop interrupted in state {:?}", self.state);
        self.presenter.show(ConsoleEvent::Interrupted);
        self.state = LoopState::Terminated(TerminationReason::Interrupted);
    }

    /// Performs exactly one state transition.
    pub async fn step(&mut self) {
        let current = std::mem::replace(&mut self.state, LoopState::AwaitingUserDirective);
        self.state = match current {
            LoopState::AwaitingUserDirective => self.await_user_directive().await,
            LoopState::QueryingModel => self.query_model().await,
            LoopState::ExecutingAction(directive) => {
                self.execute_action(&directive);
                LoopState::AwaitingUserDirective
            }
            LoopState::EmittingText => LoopState::AwaitingUserDirective,
            terminated @ LoopState::Terminated(_) => terminated,
        };
    }

    async fn await_user_directive(&mut self) -> LoopState {
        match self.source.next_directive().await {
            Ok(Some(line)) if is_exit_directive(&line) => {
                self.presenter.show(ConsoleEvent::Exiting);
                LoopState::Terminated(TerminationReason::UserExit)
            }
            Ok(Some(line)) => {
                debug!("User directive received: {:?}", line.trim());
                self.conversation.push_next_action_request();
                LoopState::QueryingModel
            }
            Ok(None) => {
                debug!("Input closed, ending session");
                self.presenter.show(ConsoleEvent::Exiting);
                LoopState::Terminated(TerminationReason::InputClosed)
            }
            Err(e) => {
                warn!("Failed to read user directive: {}", e);
                let message = e.to_string();
                self.presenter.show(ConsoleEvent::InputFailed {
                    message: message.clone(),
                });
                LoopState::Terminated(TerminationReason::InputFailed(message))
            }
        }
    }

    async fn query_model(&mut self) -> LoopState {
        // Full capability list on every call
        let specs = self.registry.all_specs();
        let params = GenerationParams::from(&self.config);
        self.gateway_calls += 1;

        match self
            .gateway
            .converse(&self.conversation, &specs, &params)
            .await
        {
            Ok(ModelReply::FunctionCall(directive)) => LoopState::ExecutingAction(directive),
            Ok(ModelReply::Text(content)) => {
                self.conversation.push_assistant(content.clone());
                self.presenter.show(ConsoleEvent::ModelText { content });
                LoopState::EmittingText
            }
            Err(e) => {
                let message = match e {
                    BotError::Gateway(message) => message,
                    other => other.to_string(),
                };
                self.presenter.show(ConsoleEvent::GatewayFailed {
                    message: message.clone(),
                });
                LoopState::Terminated(TerminationReason::GatewayFailure(message))
            }
        }
    }

    fn execute_action(&mut self, directive: &FunctionCallDirective) {
        let registry = self.registry;
        let arguments = parse_arguments(&directive.raw_arguments).unwrap_or_else(|e| {
            warn!(
                "Failed to parse arguments for {}: {}, raw={}",
                directive.name, e, directive.raw_arguments
            );
            self.presenter.show(ConsoleEvent::ArgumentParseFailed {
                message: e.to_string(),
            });
            Map::new()
        });

        self.presenter.show(ConsoleEvent::FunctionRequested {
            name: directive.name.clone(),
            arguments: Value::Object(arguments.clone()),
        });

        // Unknown actions get no feedback turn; the model is not told its request was rejected.
        let entry = match registry.lookup(&directive.name) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Model request rejected: {}", e);
                self.presenter.show(ConsoleEvent::UnknownFunction {
                    name: directive.name.clone(),
                });
                return;
            }
        };
        let kind = entry.kind;

        let validated = entry.spec.validate_arguments(arguments);
        for issue in validated.issues {
            warn!("Argument issue for {}: {}", kind, issue);
            self.presenter.show(ConsoleEvent::ArgumentAdjusted {
                action: kind.name().to_string(),
                message: issue,
            });
        }

        let outcome = entry.handler().execute(&validated.arguments, &mut rand::thread_rng());
        debug!("Action {} produced {}", kind, outcome.result);
        self.presenter.show(ConsoleEvent::Action {
            narration: outcome.narration,
        });
        self.conversation
            .push_function_result(kind.name(), outcome.result);
    }
}

#[cfg(test)]
mod tests {
    use super::{is_exit_directive, parse_arguments};
    use crate::util::errors::BotError;

    #[test]
    fn exit_directives_are_case_insensitive() {
        assert!(is_exit_directive("exit"));
        assert!(is_exit_directive("QUIT\n"));
        assert!(is_exit_directive("  Exit "));
        assert!(!is_exit_directive("next"));
        assert!(!is_exit_directive("exit now"));
    }

    #[test]
    fn parse_arguments_accepts_objects_and_empty_input() {
        let args = parse_arguments(r#"{"enemy_position":[10,20]}"#).unwrap();
        assert_eq!(args["enemy_position"], serde_json::json!([10, 20]));
        assert!(parse_arguments("{}").unwrap().is_empty());
        assert!(parse_arguments("").unwrap().is_empty());
        assert!(parse_arguments("null").unwrap().is_empty());
    }

    #[test]
    fn parse_arguments_rejects_malformed_or_non_object_json() {
        assert!(matches!(
            parse_arguments("{not json"),
            Err(BotError::ArgumentParse(_))
        ));
        assert!(matches!(
            parse_arguments("[1, 2]"),
            Err(BotError::ArgumentParse(_))
        ));
    }
}
