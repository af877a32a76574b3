use super::util::{format_position, random_position};
use crate::agentic::tools::framework::{ActionKind, ActionOutcome, GameAction};
use rand::RngCore;
use serde_json::{json, Map, Value};

pub struct ExploreAreaAction;

impl ExploreAreaAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExploreAreaAction {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAction for ExploreAreaAction {
    fn kind(&self) -> ActionKind {
        ActionKind::ExploreArea
    }

    fn description(&self) -> &str {
        "Explore a new area to find enemies or resources."
    }

    fn execute(&self, _arguments: &Map<String, Value>, rng: &mut dyn RngCore) -> ActionOutcome {
        let position = random_position(rng);
        ActionOutcome {
            result: json!(position),
            narration: format!("Exploring area; moved to {}", format_position(&position)),
        }
    }
}
