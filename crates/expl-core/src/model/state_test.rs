use super::{ContentItem, Handler, Interaction, RuleSpec, State};
use serde_json::json;

fn two_handler_state() -> State {
    State {
        content: vec![ContentItem::text("hello")],
        interaction: Interaction {
            id: Some("TextInput".to_string()),
            customization_args: Default::default(),
            handlers: vec![
                Handler {
                    name: "submit".to_string(),
                    rule_specs: vec![RuleSpec::default_rule("B"), RuleSpec::default_rule("C")],
                },
                Handler {
                    name: "hint".to_string(),
                    rule_specs: vec![RuleSpec::default_rule("B")],
                },
            ],
        },
        param_changes: Vec::new(),
    }
}

#[test]
fn redirect_rewrites_matching_destinations_across_handlers() {
    let mut state = two_handler_state();
    assert_eq!(state.redirect_destinations("B", "B2"), 2);
    let dests = state.rule_specs().map(|spec| spec.dest.as_str()).collect::<Vec<_>>();
    assert_eq!(dests, vec!["B2", "C", "B2"]);
}

#[test]
fn primary_rule_specs_come_from_first_handler() {
    let state = two_handler_state();
    assert_eq!(state.primary_rule_specs().len(), 2);
    assert_eq!(State::default().primary_rule_specs().len(), 0);
}

#[test]
fn state_decodes_with_missing_optional_sections() {
    let state: State = serde_json::from_value(json!({
        "interaction": {
            "handlers": [{"name": "submit", "rule_specs": [{"dest": "END"}]}]
        }
    }))
    .expect("must decode");
    assert!(state.interaction.id.is_none());
    assert!(state.content.is_empty());
    assert!(!state.primary_rule_specs()[0].is_default_rule());
}
