//! Bot configuration
//!
//! Constructed once at startup and handed explicitly to the dispatch loop and
//! the model gateway. Nothing here is mutated after construction.

use crate::util::errors::{BotError, BotResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Placeholder used when no credential is configured; the first real call fails with an auth error.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "o3-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 100;
pub const DEFAULT_TURN_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI MMO game bot controlling a character in an online game. \
Decide which action to perform: scan_for_enemies, attack_enemy, or explore_area. \
Return a function call directive when appropriate.";

/// Reasoning-effort hint passed through to the model service untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningEffort {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(BotError::config(format!(
                "Invalid reasoning effort '{}', expected one of low, medium, high",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub reasoning: ReasoningEffort,
    pub max_output_tokens: u32,
    /// Pause between a completed turn and the next prompt
    pub turn_delay: Duration,
    pub system_prompt: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            reasoning: ReasoningEffort::default(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            turn_delay: DEFAULT_TURN_DELAY,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl BotConfig {
    /// Reads the credential and endpoint from the process environment.
    pub fn from_env(model: impl Into<String>, reasoning: ReasoningEffort) -> Self {
        Self::from_lookup(model, reasoning, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(model: impl Into<String>, reasoning: ReasoningEffort, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                log::warn!(
                    "{} is not set, using placeholder credential; requests will be rejected",
                    API_KEY_ENV
                );
                PLACEHOLDER_API_KEY.to_string()
            });
        let base_url = lookup(BASE_URL_ENV)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            base_url,
            model: model.into(),
            reasoning,
            ..Self::default()
        }
    }

    pub fn with_turn_delay(mut self, turn_delay: Duration) -> Self {
        self.turn_delay = turn_delay;
        self
    }

    pub fn validate(&self) -> BotResult<()> {
        if self.model.trim().is_empty() {
            return Err(BotError::config("model must not be empty"));
        }
        if self.max_output_tokens == 0 {
            return Err(BotError::config("max_output_tokens must be positive"));
        }
        Ok(())
    }
}
