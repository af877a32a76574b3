//! Terminal interface module
//!
//! Line-based prompt and styled status output using crossterm

use async_trait::async_trait;
use crossterm::style::{StyledContent, Stylize};
use mmo_bot_core::{BotResult, ConsoleEvent, DirectiveSource, Presenter};
use std::io::{self, BufRead, Write};
use std::thread;
use tokio::sync::mpsc;

pub const PROMPT: &str = "Enter a command ('next' for next action, 'exit' to quit)";

const RULE_WIDTH: usize = 72;

fn rule(title: &str) -> String {
    let title = format!(" {} ", title);
    let side = RULE_WIDTH.saturating_sub(title.chars().count()) / 2;
    let bar = "─".repeat(side);
    format!("{}{}{}", bar, title, bar)
}

fn label(text: &str) -> StyledContent<&str> {
    text.bold()
}

/// Formats one loop event as a styled terminal line.
pub fn render_event(event: &ConsoleEvent) -> String {
    match event {
        ConsoleEvent::SessionStarted { model, reasoning } => rule(&format!(
            "Starting MMO Bot (Model: {}, Reasoning: {})",
            model, reasoning
        ))
        .blue()
        .bold()
        .to_string(),
        ConsoleEvent::Action { narration } => {
            format!("{} {}", label("Action:").green(), narration)
        }
        ConsoleEvent::FunctionRequested { name, arguments } => format!(
            "{} {} with arguments {}",
            label("Model requested function:").cyan(),
            name,
            arguments
        ),
        ConsoleEvent::ModelText { content } => {
            format!("{} {}", label("Model says:").magenta(), content)
        }
        ConsoleEvent::ArgumentParseFailed { message } => {
            format!("{} {}", label("Failed to parse arguments:").red(), message)
        }
        ConsoleEvent::ArgumentAdjusted { action, message } => format!(
            "{} {}: {}",
            label("Argument warning:").yellow(),
            action,
            message
        ),
        ConsoleEvent::UnknownFunction { name } => format!(
            "{} Unknown function '{}'.",
            label("Warning:").red(),
            name
        ),
        ConsoleEvent::GatewayFailed { message } => {
            format!("{} {}", label("API Error:").red(), message)
        }
        ConsoleEvent::InputFailed { message } => {
            format!("{} {}", label("Input Error:").red(), message)
        }
        ConsoleEvent::Exiting => "Exiting bot loop.".red().bold().to_string(),
        ConsoleEvent::Interrupted => "\nBot loop terminated by user.".red().bold().to_string(),
    }
}

pub fn render_startup(model: &str, reasoning: &str) -> String {
    format!(
        "{} {} with reasoning effort set to {}.",
        label("Using model:").green(),
        model,
        reasoning.green().bold()
    )
}

/// Prompts on stdout and reads one directive per line from stdin.
///
/// Lines are read on a dedicated thread so an interrupted session can exit
/// without waiting for the user to press Enter.
pub struct TerminalConsole {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });
        Self { lines: rx }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectiveSource for TerminalConsole {
    async fn next_directive(&mut self) -> BotResult<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "\n{}: ", PROMPT.yellow().bold())?;
            stdout.flush()?;
        }
        match self.lines.recv().await {
            Some(Ok(line)) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }
}

/// Prints loop events; problems go to stderr.
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show(&self, event: ConsoleEvent) {
        let line = render_event(&event);
        if event.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
