use crate::registry::InteractionRegistry;
use expl_core::{State, END_DEST};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: BTreeSet<String>,
    pub links: Vec<GraphLink>,
    pub init_state_id: String,
    pub final_state_ids: Vec<String>,
}

impl GraphData {
    pub fn successors<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links
            .iter()
            .filter(move |link| link.source == node)
            .map(|link| link.target.as_str())
    }

    pub fn predecessors<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links
            .iter()
            .filter(move |link| link.target == node)
            .map(|link| link.source.as_str())
    }
}

/// Derives the exploration graph: one node per state plus END, one link per
/// rule of every state that has an interaction.
pub fn compute_graph(
    init_state_name: &str,
    states: &BTreeMap<String, State>,
    interactions: &InteractionRegistry,
) -> GraphData {
    let mut nodes = BTreeSet::new();
    let mut links = Vec::new();
    let mut final_state_ids = vec![END_DEST.to_string()];

    for (state_name, state) in states {
        nodes.insert(state_name.clone());
        let Some(interaction_id) = state.interaction.id.as_deref() else {
            continue;
        };
        if interactions.is_terminal(interaction_id) {
            final_state_ids.push(state_name.clone());
        }
        links.extend(state.rule_specs().map(|rule_spec| GraphLink {
            source: state_name.clone(),
            target: rule_spec.dest.clone(),
        }));
    }
    nodes.insert(END_DEST.to_string());

    GraphData {
        nodes,
        links,
        init_state_id: init_state_name.to_string(),
        final_state_ids,
    }
}

#[cfg(test)]
#[path = "compute_test.rs"]
mod tests;
