use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GadgetData {
    pub gadget_id: String,
    pub gadget_name: String,
    #[serde(default)]
    pub visible_in_states: Vec<String>,
    #[serde(default)]
    pub customization_args: Map<String, Value>,
}

/// Gadgets grouped by the skin panel that hosts them, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinCustomizations {
    #[serde(default)]
    pub panels_contents: BTreeMap<String, Vec<GadgetData>>,
}
