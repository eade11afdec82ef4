use expl_core::{
    ContentItem, ExplorationDocument, GadgetData, Handler, Interaction, RuleSpec,
    SkinCustomizations, State,
};
use serde_json::{json, Map};
use std::collections::BTreeMap;

/// A text-input state whose rules lead to `dests`; the last rule is the default rule.
pub(crate) fn state_to(dests: &[&str]) -> State {
    let count = dests.len();
    let rule_specs = dests
        .iter()
        .enumerate()
        .map(|(index, dest)| {
            if index + 1 == count {
                RuleSpec::default_rule(*dest)
            } else {
                RuleSpec {
                    definition: json!({"rule_type": "atomic", "name": "Equals", "inputs": {"x": index}}),
                    dest: dest.to_string(),
                    feedback: vec!["Nice.".to_string()],
                    param_changes: Vec::new(),
                }
            }
        })
        .collect();
    State {
        content: vec![ContentItem::text("Question?")],
        interaction: Interaction {
            id: Some("TextInput".to_string()),
            customization_args: Map::new(),
            handlers: vec![Handler {
                name: "submit".to_string(),
                rule_specs,
            }],
        },
        param_changes: Vec::new(),
    }
}

pub(crate) fn document(init_state_name: &str, states: Vec<(&str, State)>) -> ExplorationDocument {
    ExplorationDocument {
        version: 1,
        title: "Graph basics".to_string(),
        category: "Mathematics".to_string(),
        objective: "Learn about graphs".to_string(),
        language_code: "en".to_string(),
        tags: Vec::new(),
        param_specs: Map::new(),
        param_changes: Vec::new(),
        default_skin_id: "conversation_v1".to_string(),
        init_state_name: init_state_name.to_string(),
        states: states
            .into_iter()
            .map(|(name, state)| (name.to_string(), state))
            .collect::<BTreeMap<_, _>>(),
        skin_customizations: SkinCustomizations::default(),
    }
}

pub(crate) fn gadget(gadget_id: &str, gadget_name: &str) -> GadgetData {
    GadgetData {
        gadget_id: gadget_id.to_string(),
        gadget_name: gadget_name.to_string(),
        visible_in_states: vec!["A".to_string()],
        customization_args: Map::from_iter([("title".to_string(), json!({"value": gadget_name}))]),
    }
}

pub(crate) fn skin(panels: Vec<(&str, Vec<GadgetData>)>) -> SkinCustomizations {
    SkinCustomizations {
        panels_contents: panels
            .into_iter()
            .map(|(name, gadgets)| (name.to_string(), gadgets))
            .collect(),
    }
}

pub(crate) fn dests_of(state: &State) -> Vec<String> {
    state.rule_specs().map(|spec| spec.dest.clone()).collect()
}
