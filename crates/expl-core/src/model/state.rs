use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Destination name of the terminal sentinel node.
pub const END_DEST: &str = "END";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub value: String,
}

impl ContentItem {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: default_content_type(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamChange {
    pub name: String,
    pub generator_id: String,
    #[serde(default)]
    pub customization_args: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub definition: Value,
    pub dest: String,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub param_changes: Vec<ParamChange>,
}

impl RuleSpec {
    pub fn default_rule(dest: impl Into<String>) -> Self {
        Self {
            definition: serde_json::json!({ "rule_type": "default" }),
            dest: dest.into(),
            feedback: Vec::new(),
            param_changes: Vec::new(),
        }
    }

    pub fn is_default_rule(&self) -> bool {
        self.definition.get("rule_type").and_then(Value::as_str) == Some("default")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handler {
    pub name: String,
    #[serde(default)]
    pub rule_specs: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customization_args: Map<String, Value>,
    #[serde(default)]
    pub handlers: Vec<Handler>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub interaction: Interaction,
    #[serde(default)]
    pub param_changes: Vec<ParamChange>,
}

impl State {
    pub fn rule_specs(&self) -> impl Iterator<Item = &RuleSpec> {
        self.interaction
            .handlers
            .iter()
            .flat_map(|handler| handler.rule_specs.iter())
    }

    pub fn rule_specs_mut(&mut self) -> impl Iterator<Item = &mut RuleSpec> {
        self.interaction
            .handlers
            .iter_mut()
            .flat_map(|handler| handler.rule_specs.iter_mut())
    }

    /// Rule specs of the first handler, which is what interaction validators inspect.
    pub fn primary_rule_specs(&self) -> &[RuleSpec] {
        self.interaction
            .handlers
            .first()
            .map(|handler| handler.rule_specs.as_slice())
            .unwrap_or(&[])
    }

    /// Rewrites every rule destination equal to `from` and returns how many changed.
    pub fn redirect_destinations(&mut self, from: &str, to: &str) -> usize {
        let mut count = 0;
        for rule_spec in self.rule_specs_mut() {
            if rule_spec.dest == from {
                rule_spec.dest = to.to_string();
                count += 1;
            }
        }
        count
    }

    pub fn set_all_destinations(&mut self, dest: &str) {
        for rule_spec in self.rule_specs_mut() {
            rule_spec.dest = dest.to_string();
        }
    }
}

fn default_content_type() -> String {
    "text".to_string()
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
