use super::util::{format_position, random_position, Position};
use crate::agentic::tools::framework::{ActionKind, ActionOutcome, GameAction};
use rand::{Rng, RngCore};
use serde_json::{json, Map, Value};

pub const MAX_ENEMIES: usize = 3;

/// Scans the surroundings and reports 0..=3 enemy positions.
pub struct ScanForEnemiesAction;

impl ScanForEnemiesAction {
    pub fn new() -> Self {
        Self
    }

    fn scan(rng: &mut dyn RngCore) -> Vec<Position> {
        let count = rng.gen_range(0..=MAX_ENEMIES);
        (0..count).map(|_| random_position(rng)).collect()
    }
}

impl Default for ScanForEnemiesAction {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAction for ScanForEnemiesAction {
    fn kind(&self) -> ActionKind {
        ActionKind::ScanForEnemies
    }

    fn description(&self) -> &str {
        "Scan the current area for enemies."
    }

    fn execute(&self, _arguments: &Map<String, Value>, rng: &mut dyn RngCore) -> ActionOutcome {
        let enemies = Self::scan(rng);
        let listed: Vec<String> = enemies.iter().map(|p| format_position(p)).collect();
        ActionOutcome {
            result: json!(enemies),
            narration: format!("Scanned enemies: [{}]", listed.join(", ")),
        }
    }
}
