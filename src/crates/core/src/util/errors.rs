//! Error types shared by the whole bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Transport, auth or service failure talking to the model. Ends the session.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Function-call arguments the model sent were not a JSON object.
    #[error("Argument parse error: {0}")]
    ArgumentParse(String),

    /// The model named an action the registry does not know.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    pub fn argument_parse(msg: impl Into<String>) -> Self {
        Self::ArgumentParse(msg.into())
    }

    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction(name.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Gateway(err.to_string())
    }
}

pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::BotError;

    #[test]
    fn io_errors_convert_with_their_message() {
        let err: BotError = std::io::Error::other("stdin closed").into();
        assert_eq!(err.to_string(), "IO error: stdin closed");
    }

    #[test]
    fn display_includes_category_prefix() {
        assert_eq!(
            BotError::unknown_action("fly_away").to_string(),
            "Unknown action: fly_away"
        );
    }
}
