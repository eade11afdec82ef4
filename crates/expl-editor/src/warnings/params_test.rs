use super::{param_change_uses, state_param_uses, verify_parameters, ParamAction, ParamUse};
use crate::graph::compute_graph;
use crate::registry::InteractionRegistry;
use crate::test_fixtures::state_to;
use crate::warnings::reachability::forward_adjacency;
use expl_core::{ContentItem, ParamChange, State, Warning};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

fn copier(name: &str, value: &str, parse_with_jinja: bool) -> ParamChange {
    let mut customization_args = Map::new();
    customization_args.insert("value".to_string(), Value::from(value));
    customization_args.insert("parse_with_jinja".to_string(), Value::from(parse_with_jinja));
    ParamChange {
        name: name.to_string(),
        generator_id: "Copier".to_string(),
        customization_args,
    }
}

fn uses(pairs: &[(ParamAction, &str)]) -> Vec<ParamUse> {
    pairs
        .iter()
        .map(|(action, name)| ParamUse {
            action: *action,
            param_name: name.to_string(),
        })
        .collect()
}

fn verify(init: &str, states: &BTreeMap<String, State>, initial: &[ParamChange]) -> Vec<Warning> {
    let graph = compute_graph(init, states, &InteractionRegistry::default());
    let adjacency = forward_adjacency(&graph);
    verify_parameters(init, states, &adjacency, initial)
}

#[test]
fn jinja_copier_reads_before_it_sets() {
    let changes = vec![
        copier("total", "{{a + b}}", true),
        copier("label", "{{ignored}}", false),
        ParamChange {
            name: "pick".to_string(),
            generator_id: "RandomSelector".to_string(),
            customization_args: Map::from_iter([("list_of_values".to_string(), json!(["{{x}}"]))]),
        },
    ];
    assert_eq!(
        param_change_uses(&changes),
        uses(&[
            (ParamAction::Get, "a"),
            (ParamAction::Get, "b"),
            (ParamAction::Set, "total"),
            (ParamAction::Set, "label"),
            (ParamAction::Set, "pick"),
        ])
    );
}

#[test]
fn state_uses_follow_evaluation_order() {
    let mut state = state_to(&["B", "END"]);
    state.param_changes = vec![copier("n", "1", false)];
    state.content = vec![ContentItem::text("{{n}} and {{m}}")];
    state.interaction.handlers[0].rule_specs[0].feedback = vec!["Got {{answer}}".to_string()];
    assert_eq!(
        state_param_uses(&state),
        uses(&[
            (ParamAction::Set, "n"),
            (ParamAction::Get, "n"),
            (ParamAction::Get, "m"),
            (ParamAction::Set, "answer"),
            (ParamAction::Get, "answer"),
        ])
    );
}

#[test]
fn initial_param_change_reading_unset_param_is_reported_once() {
    let states = BTreeMap::from([("A".to_string(), state_to(&["END"]))]);
    let warnings = verify("A", &states, &[copier("y", "{{x}}", true)]);
    assert_eq!(
        warnings,
        vec![Warning::critical(
            "Please ensure the value of parameter \"x\" is set before it is referred to in the initial list of parameter changes."
        )]
    );
}

#[test]
fn set_on_every_path_blocks_the_search() {
    let mut setter = state_to(&["Reader"]);
    setter.param_changes = vec![copier("x", "1", false)];
    let mut reader = state_to(&["END"]);
    reader.content = vec![ContentItem::text("{{x}}")];
    let states = BTreeMap::from([
        ("A".to_string(), state_to(&["Setter"])),
        ("Reader".to_string(), reader),
        ("Setter".to_string(), setter),
    ]);
    assert!(verify("A", &states, &[]).is_empty());
}

#[test]
fn read_reachable_around_the_setter_is_reported() {
    let mut setter = state_to(&["Reader"]);
    setter.param_changes = vec![copier("x", "1", false)];
    let mut reader = state_to(&["END"]);
    reader.content = vec![ContentItem::text("{{x}}")];
    let states = BTreeMap::from([
        ("A".to_string(), state_to(&["Setter", "Reader"])),
        ("Reader".to_string(), reader),
        ("Setter".to_string(), setter),
    ]);
    assert_eq!(
        verify("A", &states, &[]),
        vec![Warning::critical(
            "Please ensure the value of parameter \"x\" is set before using it in \"Reader\"."
        )]
    );
}

#[test]
fn feedback_reads_answer_after_it_is_set() {
    let mut state = state_to(&["END"]);
    state.interaction.handlers[0].rule_specs[0].feedback = vec!["You said {{answer}}".to_string()];
    let states = BTreeMap::from([("A".to_string(), state)]);
    assert!(verify("A", &states, &[]).is_empty());
}
