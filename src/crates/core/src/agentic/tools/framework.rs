//! Game action contracts
//!
//! Every action advertises an [`ActionSpec`] to the model and executes
//! synchronously against a caller-supplied randomness source.

use indexmap::IndexMap;
use rand::RngCore;
use serde_json::{json, Map, Value};
use std::fmt;

/// The fixed set of actions the model may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ScanForEnemies,
    AttackEnemy,
    ExploreArea,
}

impl ActionKind {
    /// Registration order, which is also the order advertised to the model.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::ScanForEnemies,
        ActionKind::AttackEnemy,
        ActionKind::ExploreArea,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ScanForEnemies => "scan_for_enemies",
            Self::AttackEnemy => "attack_enemy",
            Self::ExploreArea => "explore_area",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    Array(Box<ParamType>),
}

impl ParamType {
    pub fn array_of(item: ParamType) -> Self {
        Self::Array(Box::new(item))
    }

    pub fn json_schema(&self) -> Value {
        match self {
            Self::Integer => json!({ "type": "integer" }),
            Self::Array(item) => json!({ "type": "array", "items": item.json_schema() }),
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Array(item) => value
                .as_array()
                .map(|items| items.iter().all(|v| item.accepts(v)))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub param_type: ParamType,
    pub required: bool,
    pub description: String,
}

impl ParamSpec {
    pub fn required(param_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            param_type,
            required: true,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: String,
    pub description: String,
    pub parameters: IndexMap<String, ParamSpec>,
}

/// Arguments after schema validation, plus what had to be dropped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArguments {
    pub arguments: Map<String, Value>,
    pub issues: Vec<String>,
}

impl ActionSpec {
    /// JSON-schema object advertised as the function's `parameters`.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, param) in &self.parameters {
            let mut schema = param.param_type.json_schema();
            if let Some(obj) = schema.as_object_mut() {
                obj.insert(
                    "description".to_string(),
                    Value::String(param.description.clone()),
                );
            }
            properties.insert(name.clone(), schema);
            if param.required {
                required.push(Value::String(name.clone()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    /// Keeps only declared parameters whose values match their type.
    ///
    /// Nothing here fails: mismatched or undeclared fields are dropped and
    /// missing required fields are reported, leaving the executor to fall
    /// back to its defaults.
    pub fn validate_arguments(&self, raw: Map<String, Value>) -> ValidatedArguments {
        let mut validated = ValidatedArguments::default();

        for (key, value) in raw {
            match self.parameters.get(&key) {
                Some(param) if param.param_type.accepts(&value) => {
                    validated.arguments.insert(key, value);
                }
                Some(_) => validated.issues.push(format!(
                    "parameter '{}' has unexpected value {}, using default",
                    key, value
                )),
                None => validated
                    .issues
                    .push(format!("ignoring undeclared parameter '{}'", key)),
            }
        }

        for (name, param) in &self.parameters {
            if param.required && !validated.arguments.contains_key(name) {
                validated.issues.push(format!(
                    "required parameter '{}' missing, using default",
                    name
                ));
            }
        }

        validated
    }
}

/// What an executor hands back: the value shown to the model and a line of narration for the console.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub result: Value,
    pub narration: String,
}

pub trait GameAction: Send + Sync {
    fn kind(&self) -> ActionKind;

    fn name(&self) -> &str {
        self.kind().name()
    }

    fn description(&self) -> &str;

    fn parameters(&self) -> IndexMap<String, ParamSpec> {
        IndexMap::new()
    }

    fn spec(&self) -> ActionSpec {
        ActionSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// Runs the action. `arguments` has already been validated against `spec()`.
    fn execute(&self, arguments: &Map<String, Value>, rng: &mut dyn RngCore) -> ActionOutcome;
}
