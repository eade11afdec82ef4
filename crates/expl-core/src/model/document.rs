use super::{ParamChange, SkinCustomizations, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationDocument {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub param_specs: Map<String, Value>,
    #[serde(default)]
    pub param_changes: Vec<ParamChange>,
    #[serde(default)]
    pub default_skin_id: String,
    pub init_state_name: String,
    #[serde(default)]
    pub states: BTreeMap<String, State>,
    #[serde(default)]
    pub skin_customizations: SkinCustomizations,
}

fn default_language_code() -> String {
    "en".to_string()
}
