use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationArgSpec {
    pub name: String,
    #[serde(default)]
    pub default_value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionSpec {
    #[serde(default)]
    pub is_terminal: bool,
    #[serde(default)]
    pub customization_arg_specs: Vec<CustomizationArgSpec>,
}

impl InteractionSpec {
    fn with_args(is_terminal: bool, args: &[(&str, Value)]) -> Self {
        Self {
            is_terminal,
            customization_arg_specs: args
                .iter()
                .map(|(name, default_value)| CustomizationArgSpec {
                    name: name.to_string(),
                    default_value: default_value.clone(),
                })
                .collect(),
        }
    }
}

/// Interaction types known to the editor, keyed by interaction id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionRegistry {
    specs: BTreeMap<String, InteractionSpec>,
}

impl InteractionRegistry {
    pub fn new(specs: BTreeMap<String, InteractionSpec>) -> Self {
        Self { specs }
    }

    pub fn insert(&mut self, interaction_id: impl Into<String>, spec: InteractionSpec) {
        self.specs.insert(interaction_id.into(), spec);
    }

    pub fn get(&self, interaction_id: &str) -> Option<&InteractionSpec> {
        self.specs.get(interaction_id)
    }

    pub fn contains(&self, interaction_id: &str) -> bool {
        self.specs.contains_key(interaction_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Unknown interaction ids are treated as non-terminal.
    pub fn is_terminal(&self, interaction_id: &str) -> bool {
        self.specs
            .get(interaction_id)
            .map(|spec| spec.is_terminal)
            .unwrap_or(false)
    }

    /// Customization args in stored form (`{name: {"value": default}}`) for a
    /// freshly selected interaction.
    pub fn default_customization_args(&self, interaction_id: &str) -> Option<Map<String, Value>> {
        let spec = self.specs.get(interaction_id)?;
        Some(
            spec.customization_arg_specs
                .iter()
                .map(|arg| (arg.name.clone(), json!({ "value": arg.default_value })))
                .collect(),
        )
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        let mut registry = Self::new(BTreeMap::new());
        registry.insert("Continue", InteractionSpec::with_args(false, &[("buttonText", json!("Continue"))]));
        registry.insert("EndExploration", InteractionSpec::with_args(true, &[]));
        registry.insert(
            "InteractiveMap",
            InteractionSpec::with_args(
                false,
                &[("latitude", json!(0.0)), ("longitude", json!(0.0)), ("zoom", json!(0))],
            ),
        );
        registry.insert(
            "MultipleChoiceInput",
            InteractionSpec::with_args(false, &[("choices", json!(["Default choice"]))]),
        );
        registry.insert(
            "TextInput",
            InteractionSpec::with_args(false, &[("placeholder", json!("")), ("rows", json!(1))]),
        );
        registry
    }
}

#[cfg(test)]
#[path = "interactions_test.rs"]
mod tests;
