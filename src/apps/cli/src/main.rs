//! MMO Bot CLI
//!
//! Asks a language model what the game character should do next, runs the
//! requested action locally and feeds the result back. Type 'exit' or 'quit'
//! at the prompt to stop.

mod logging;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mmo_bot_core::agentic::tools::get_global_registry;
use mmo_bot_core::{BotConfig, DispatchLoop, OpenAiGateway, ReasoningEffort};
use tokio_util::sync::CancellationToken;
use ui::{TerminalConsole, TerminalPresenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReasoningArg {
    Low,
    Medium,
    High,
}

impl From<ReasoningArg> for ReasoningEffort {
    fn from(arg: ReasoningArg) -> Self {
        match arg {
            ReasoningArg::Low => ReasoningEffort::Low,
            ReasoningArg::Medium => ReasoningEffort::Medium,
            ReasoningArg::High => ReasoningEffort::High,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mmo-bot", version, about = "Model-driven MMO game bot loop")]
struct Cli {
    /// Model to use (e.g. o3-mini, gpt-4)
    #[arg(long, default_value = "o3-mini")]
    model: String,

    /// Reasoning effort level
    #[arg(long, value_enum, ignore_case = true, default_value = "medium")]
    reasoning: ReasoningArg,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let config = BotConfig::from_env(cli.model, cli.reasoning.into());
    config.validate()?;
    println!(
        "{}",
        ui::render_startup(&config.model, config.reasoning.as_str())
    );

    let gateway = OpenAiGateway::new(&config).context("Failed to create model client")?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let mut dispatch = DispatchLoop::new(
        config,
        gateway,
        TerminalConsole::new(),
        TerminalPresenter,
        get_global_registry(),
    );
    let reason = dispatch.run(cancel).await;
    tracing::info!(
        "Session ended: reason={:?}, turns={}",
        reason,
        dispatch.conversation().len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["mmo-bot"]).unwrap();
        assert_eq!(cli.model, "o3-mini");
        assert_eq!(cli.reasoning, ReasoningArg::Medium);
    }

    #[test]
    fn reasoning_is_case_insensitive() {
        let cli = Cli::try_parse_from(["mmo-bot", "--model", "gpt-4", "--reasoning", "HIGH"]).unwrap();
        assert_eq!(cli.model, "gpt-4");
        assert_eq!(ReasoningEffort::from(cli.reasoning), ReasoningEffort::High);
    }

    #[test]
    fn rejects_unknown_reasoning_level() {
        assert!(Cli::try_parse_from(["mmo-bot", "--reasoning", "extreme"]).is_err());
    }
}
