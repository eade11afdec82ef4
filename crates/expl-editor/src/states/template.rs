use expl_core::{ContentItem, Handler, Interaction, RuleSpec, State};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

/// The state every newly added state starts from. Its rule destinations are
/// rewritten to the new state's own name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewStateTemplate {
    state: State,
}

impl NewStateTemplate {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn instantiate(&self, state_name: &str) -> State {
        let mut state = self.state.clone();
        state.set_all_destinations(state_name);
        state
    }
}

impl Default for NewStateTemplate {
    fn default() -> Self {
        let mut customization_args = Map::new();
        customization_args.insert("placeholder".to_string(), json!({ "value": "" }));
        customization_args.insert("rows".to_string(), json!({ "value": 1 }));
        Self {
            state: State {
                content: vec![ContentItem::text("")],
                interaction: Interaction {
                    id: Some("TextInput".to_string()),
                    customization_args,
                    handlers: vec![Handler {
                        name: "submit".to_string(),
                        rule_specs: vec![RuleSpec::default_rule("")],
                    }],
                },
                param_changes: Vec::new(),
            },
        }
    }
}
