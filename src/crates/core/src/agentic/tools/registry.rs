//! Action registry
//!
//! Fixed name → action map built once. Lookups of names the model invents
//! return `UnknownAction` and are expected, not fatal.

use super::framework::{ActionKind, ActionSpec, GameAction};
use super::implementations::{AttackEnemyAction, ExploreAreaAction, ScanForEnemiesAction};
use crate::util::errors::{BotError, BotResult};
use indexmap::IndexMap;
use log::debug;
use std::sync::OnceLock;

/// One catalog entry; the spec and handler always come from the same action.
pub struct RegisteredAction {
    pub kind: ActionKind,
    pub spec: ActionSpec,
    handler: Box<dyn GameAction>,
}

impl RegisteredAction {
    pub fn handler(&self) -> &dyn GameAction {
        self.handler.as_ref()
    }
}

pub struct ActionRegistry {
    actions: IndexMap<String, RegisteredAction>,
}

static GLOBAL_REGISTRY: OnceLock<ActionRegistry> = OnceLock::new();

/// Process-wide registry, initialized on first use.
pub fn get_global_registry() -> &'static ActionRegistry {
    GLOBAL_REGISTRY.get_or_init(ActionRegistry::new)
}

fn create_handler(kind: ActionKind) -> Box<dyn GameAction> {
    match kind {
        ActionKind::ScanForEnemies => Box::new(ScanForEnemiesAction::new()),
        ActionKind::AttackEnemy => Box::new(AttackEnemyAction::new()),
        ActionKind::ExploreArea => Box::new(ExploreAreaAction::new()),
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        let mut actions = IndexMap::new();
        for kind in ActionKind::ALL {
            let handler = create_handler(kind);
            let spec = handler.spec();
            debug_assert_eq!(spec.name, kind.name(), "handler registered under wrong name");
            debug!("Registered action: {}", spec.name);
            actions.insert(
                spec.name.clone(),
                RegisteredAction {
                    kind,
                    spec,
                    handler,
                },
            );
        }
        Self { actions }
    }

    pub fn lookup(&self, name: &str) -> BotResult<&RegisteredAction> {
        self.actions
            .get(name)
            .ok_or_else(|| BotError::unknown_action(name))
    }

    /// Specs in registration order, as advertised to the model.
    pub fn all_specs(&self) -> Vec<ActionSpec> {
        self.actions.values().map(|entry| entry.spec.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_known_action_in_order() {
        let registry = ActionRegistry::new();
        let names: Vec<String> = registry.all_specs().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["scan_for_enemies", "attack_enemy", "explore_area"]
        );
    }

    #[test]
    fn lookup_is_idempotent() {
        let registry = get_global_registry();
        let first = registry.lookup("attack_enemy").unwrap().spec.clone();
        let second = registry.lookup("attack_enemy").unwrap().spec.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_name_is_an_unknown_action() {
        let registry = ActionRegistry::new();
        match registry.lookup("fly_away") {
            Err(BotError::UnknownAction(name)) => assert_eq!(name, "fly_away"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("fly_away should not resolve"),
        }
    }

    #[test]
    fn every_entry_pairs_spec_kind_and_handler() {
        let registry = ActionRegistry::new();
        for spec in registry.all_specs() {
            let entry = registry.lookup(&spec.name).expect("entry for spec");
            assert_eq!(entry.spec, spec);
            assert_eq!(entry.kind.name(), spec.name);
            assert_eq!(entry.handler().kind(), entry.kind);
        }
    }
}
