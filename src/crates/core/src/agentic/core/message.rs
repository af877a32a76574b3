use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Function,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Function => "function",
        }
    }
}

/// One entry of the conversation history. Never mutated once appended.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    System { content: String },
    User { content: String },
    Assistant { content: String },
    FunctionResult { action_name: String, result: Value },
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    pub fn function_result(action_name: impl Into<String>, result: Value) -> Self {
        Self::FunctionResult {
            action_name: action_name.into(),
            result,
        }
    }

    pub fn role(&self) -> MessageRole {
        match self {
            Self::System { .. } => MessageRole::System,
            Self::User { .. } => MessageRole::User,
            Self::Assistant { .. } => MessageRole::Assistant,
            Self::FunctionResult { .. } => MessageRole::Function,
        }
    }

    /// Function name carried by function-result turns
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::FunctionResult { action_name, .. } => Some(action_name),
            _ => None,
        }
    }

    /// Text shown to the model. Function results are sent as serialized JSON.
    pub fn content(&self) -> String {
        match self {
            Self::System { content } | Self::User { content } | Self::Assistant { content } => {
                content.clone()
            }
            Self::FunctionResult { result, .. } => result.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageRole, Turn};
    use serde_json::json;

    #[test]
    fn function_result_serializes_payload_as_json_text() {
        let turn = Turn::function_result("explore_area", json!([12, 80]));
        assert_eq!(turn.role(), MessageRole::Function);
        assert_eq!(turn.name(), Some("explore_area"));
        assert_eq!(turn.content(), "[12,80]");
    }

    #[test]
    fn string_result_keeps_json_quoting() {
        let turn = Turn::function_result("attack_enemy", json!("attack missed"));
        assert_eq!(turn.content(), "\"attack missed\"");
    }

    #[test]
    fn plain_turns_have_no_name() {
        assert!(Turn::user("What should I do next?").name().is_none());
        assert_eq!(Turn::system("rules").role().as_str(), "system");
    }
}
