use super::{compute_graph, GraphLink};
use crate::registry::InteractionRegistry;
use crate::test_fixtures::state_to;
use expl_core::State;
use std::collections::BTreeMap;

fn states(entries: Vec<(&str, State)>) -> BTreeMap<String, State> {
    entries
        .into_iter()
        .map(|(name, state)| (name.to_string(), state))
        .collect()
}

fn link(source: &str, target: &str) -> GraphLink {
    GraphLink {
        source: source.to_string(),
        target: target.to_string(),
    }
}

#[test]
fn one_link_per_rule_and_end_always_present() {
    let graph = compute_graph(
        "A",
        &states(vec![("A", state_to(&["B", "A"])), ("B", state_to(&["END"]))]),
        &InteractionRegistry::default(),
    );
    assert_eq!(
        graph.nodes.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["A", "B", "END"]
    );
    assert_eq!(graph.links, vec![link("A", "B"), link("A", "A"), link("B", "END")]);
    assert_eq!(graph.init_state_id, "A");
    assert_eq!(graph.final_state_ids, vec!["END"]);
    assert_eq!(graph.successors("A").collect::<Vec<_>>(), vec!["B", "A"]);
    assert_eq!(graph.predecessors("END").collect::<Vec<_>>(), vec!["B"]);
}

#[test]
fn terminal_interactions_are_final_and_missing_interactions_have_no_links() {
    let mut finish = state_to(&[]);
    finish.interaction.id = Some("EndExploration".to_string());
    let mut blank = state_to(&["A"]);
    blank.interaction.id = None;

    let graph = compute_graph(
        "A",
        &states(vec![("A", state_to(&["Z"])), ("Blank", blank), ("Z", finish)]),
        &InteractionRegistry::default(),
    );
    assert_eq!(graph.final_state_ids, vec!["END", "Z"]);
    assert_eq!(graph.links, vec![link("A", "Z")]);
    assert!(graph.nodes.contains("Blank"));
}

#[test]
fn unknown_interaction_is_not_terminal() {
    let mut custom = state_to(&["A"]);
    custom.interaction.id = Some("Unregistered".to_string());
    let graph = compute_graph(
        "A",
        &states(vec![("A", custom)]),
        &InteractionRegistry::default(),
    );
    assert_eq!(graph.final_state_ids, vec!["END"]);
    assert_eq!(graph.links, vec![link("A", "A")]);
}
