use super::util::format_position;
use crate::agentic::tools::framework::{ActionKind, ActionOutcome, GameAction, ParamSpec, ParamType};
use indexmap::IndexMap;
use log::warn;
use rand::{Rng, RngCore};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const ATTACK_SUCCESSFUL: &str = "attack successful";
pub const ATTACK_MISSED: &str = "attack missed";

fn default_enemy_position() -> Vec<i64> {
    vec![0, 0]
}

#[derive(Debug, Deserialize)]
struct AttackArgs {
    #[serde(default = "default_enemy_position")]
    enemy_position: Vec<i64>,
}

impl Default for AttackArgs {
    fn default() -> Self {
        Self {
            enemy_position: default_enemy_position(),
        }
    }
}

/// Attacks whatever is at the given position. No memory of earlier scans.
pub struct AttackEnemyAction;

impl AttackEnemyAction {
    pub fn new() -> Self {
        Self
    }

    fn parse_args(arguments: &Map<String, Value>) -> AttackArgs {
        serde_json::from_value(Value::Object(arguments.clone())).unwrap_or_else(|e| {
            warn!("Invalid attack_enemy arguments, using defaults: {}", e);
            AttackArgs::default()
        })
    }
}

impl Default for AttackEnemyAction {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAction for AttackEnemyAction {
    fn kind(&self) -> ActionKind {
        ActionKind::AttackEnemy
    }

    fn description(&self) -> &str {
        "Attack an enemy at a specified position."
    }

    fn parameters(&self) -> IndexMap<String, ParamSpec> {
        let mut parameters = IndexMap::new();
        parameters.insert(
            "enemy_position".to_string(),
            ParamSpec::required(
                ParamType::array_of(ParamType::Integer),
                "Coordinates [x, y] of the enemy to attack.",
            ),
        );
        parameters
    }

    fn execute(&self, arguments: &Map<String, Value>, rng: &mut dyn RngCore) -> ActionOutcome {
        let args = Self::parse_args(arguments);
        let outcome = if rng.gen_bool(0.5) {
            ATTACK_SUCCESSFUL
        } else {
            ATTACK_MISSED
        };
        ActionOutcome {
            result: Value::String(outcome.to_string()),
            narration: format!(
                "Attacking enemy at {}...",
                format_position(&args.enemy_position)
            ),
        }
    }
}
