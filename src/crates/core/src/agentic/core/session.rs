use super::message::Turn;
use serde_json::Value;

/// The fixed user turn appended each time the human advances the loop.
pub const NEXT_ACTION_PROMPT: &str = "What should I do next?";

/// Ordered, append-only conversation history for one interactive session.
///
/// Always starts with exactly one system turn. Turns are never removed or
/// reordered; the history is dropped when the process exits.
#[derive(Debug, Clone)]
pub struct ConversationState {
    session_id: String,
    turns: Vec<Turn>,
}

impl ConversationState {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            turns: vec![Turn::system(system_prompt)],
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Never true: the system turn is always present.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_next_action_request(&mut self) {
        self.turns.push(Turn::user(NEXT_ACTION_PROMPT));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn push_function_result(&mut self, action_name: impl Into<String>, result: Value) {
        self.turns.push(Turn::function_result(action_name, result));
    }
}
