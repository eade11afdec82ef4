use super::params::verify_parameters;
use super::reachability::{forward_adjacency, reversed_adjacency, unreached_nodes};
use crate::graph::GraphData;
use crate::registry::ValidatorRegistry;
use expl_core::{has_critical_warnings, ParamChange, State, Warning, END_DEST};
use std::collections::BTreeMap;
use tracing::debug;

/// Everything one warnings pass looks at.
#[derive(Debug, Clone, Copy)]
pub struct WarningsInput<'a> {
    pub states: &'a BTreeMap<String, State>,
    pub graph: Option<&'a GraphData>,
    pub exploration_param_changes: &'a [ParamChange],
    pub objective: &'a str,
    pub validators: &'a ValidatorRegistry,
}

/// Recomputes the full warning list. Order: missing interactions,
/// unreachable states, dead ends, parameter flow, per-interaction
/// validation, missing objective.
pub fn compute_warnings(input: &WarningsInput<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let without_interaction: Vec<&str> = input
        .states
        .iter()
        .filter(|(_, state)| state.interaction.id.is_none())
        .map(|(name, _)| name.as_str())
        .collect();
    if !without_interaction.is_empty() {
        warnings.push(Warning::critical(format!(
            "Please add interactions for these states: {}.",
            without_interaction.join(", ")
        )));
    }

    if let Some(graph) = input.graph {
        warnings.extend(structural_warnings(graph));
        let forward = forward_adjacency(graph);
        warnings.extend(verify_parameters(
            &graph.init_state_id,
            input.states,
            &forward,
            input.exploration_param_changes,
        ));
    }

    for (state_name, state) in input.states {
        let Some(interaction_id) = state.interaction.id.as_deref() else {
            continue;
        };
        let interaction_warnings = input.validators.validate(
            interaction_id,
            state_name,
            &state.interaction.customization_args,
            state.primary_rule_specs(),
        );
        warnings.extend(
            interaction_warnings
                .into_iter()
                .map(|warning| warning.scoped_to_state(state_name)),
        );
    }

    if input.objective.is_empty() {
        warnings.push(Warning::error(
            "Please specify an objective (in the Settings tab).",
        ));
    }

    debug!(count = warnings.len(), "warnings recomputed");
    warnings
}

fn structural_warnings(graph: &GraphData) -> Vec<Warning> {
    let forward = forward_adjacency(graph);
    let unreachable: Vec<&str> =
        unreached_nodes(graph, [graph.init_state_id.as_str()], &forward)
            .into_iter()
            .filter(|node| *node != END_DEST)
            .collect();
    if !unreachable.is_empty() {
        return vec![Warning::error(format!(
            "The following state(s) are unreachable: {}.",
            unreachable.join(", ")
        ))];
    }

    let reversed = reversed_adjacency(graph);
    let dead_ends = unreached_nodes(
        graph,
        graph.final_state_ids.iter().map(String::as_str),
        &reversed,
    );
    let described = match dead_ends.as_slice() {
        [] => return Vec::new(),
        [single] => format!("the following state: {single}"),
        many => format!("each of: {}", many.join(", ")),
    };
    vec![Warning::error(format!(
        "Please make sure there's a way to complete the exploration starting from {described}."
    ))]
}

/// Holds the result of the latest warnings pass.
#[derive(Debug, Clone, Default)]
pub struct WarningsService {
    warnings: Vec<Warning>,
}

impl WarningsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, input: &WarningsInput<'_>) -> &[Warning] {
        self.warnings = compute_warnings(input);
        &self.warnings
    }

    pub fn count_warnings(&self) -> usize {
        self.warnings.len()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_critical_warnings(&self) -> bool {
        has_critical_warnings(&self.warnings)
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
