use super::reachability::Adjacency;
use expl_core::{params_from_string, ParamChange, State, Warning};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

const ANSWER_PARAM: &str = "answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamAction {
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParamUse {
    pub action: ParamAction,
    pub param_name: String,
}

impl ParamUse {
    fn get(param_name: impl Into<String>) -> Self {
        Self {
            action: ParamAction::Get,
            param_name: param_name.into(),
        }
    }

    fn set(param_name: impl Into<String>) -> Self {
        Self {
            action: ParamAction::Set,
            param_name: param_name.into(),
        }
    }
}

/// Copier changes evaluated as expressions read the params they mention
/// before setting their own; every other change only sets.
pub(crate) fn param_change_uses(param_changes: &[ParamChange]) -> Vec<ParamUse> {
    let mut uses = Vec::new();
    for change in param_changes {
        let parse_with_jinja = change
            .customization_args
            .get("parse_with_jinja")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if change.generator_id == "Copier" && parse_with_jinja {
            let expression = change
                .customization_args
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default();
            uses.extend(params_from_string(expression).into_iter().map(ParamUse::get));
        }
        uses.push(ParamUse::set(&change.name));
    }
    uses
}

/// Param uses of one state in evaluation order: its param changes, its
/// content, the learner's answer, then rule feedback.
pub(crate) fn state_param_uses(state: &State) -> Vec<ParamUse> {
    let mut uses = param_change_uses(&state.param_changes);
    for item in &state.content {
        uses.extend(params_from_string(&item.value).into_iter().map(ParamUse::get));
    }
    uses.push(ParamUse::set(ANSWER_PARAM));
    for rule_spec in state.rule_specs() {
        for feedback in &rule_spec.feedback {
            uses.extend(params_from_string(feedback).into_iter().map(ParamUse::get));
        }
    }
    uses
}

fn first_action(uses: &[ParamUse], param_name: &str) -> Option<ParamAction> {
    uses.iter()
        .find(|param_use| param_use.param_name == param_name)
        .map(|param_use| param_use.action)
}

/// Reports every parameter that can be read on some path from the initial
/// state before anything sets it.
pub(crate) fn verify_parameters(
    init_state_name: &str,
    states: &BTreeMap<String, State>,
    adjacency: &Adjacency<'_>,
    exploration_param_changes: &[ParamChange],
) -> Vec<Warning> {
    let exploration_uses = param_change_uses(exploration_param_changes);
    let state_uses: BTreeMap<&str, Vec<ParamUse>> = states
        .iter()
        .map(|(name, state)| (name.as_str(), state_param_uses(state)))
        .collect();

    let mut param_names: Vec<&str> = Vec::new();
    for param_use in exploration_uses.iter().chain(state_uses.values().flatten()) {
        if !param_names.contains(&param_use.param_name.as_str()) {
            param_names.push(&param_use.param_name);
        }
    }

    let mut warnings = Vec::new();
    for param_name in param_names {
        match first_action(&exploration_uses, param_name) {
            Some(ParamAction::Get) => {
                warnings.push(Warning::critical(format!(
                    "Please ensure the value of parameter \"{param_name}\" is set before it is \
                     referred to in the initial list of parameter changes."
                )));
                continue;
            }
            Some(ParamAction::Set) => continue,
            None => {}
        }

        if let Some(state_name) = first_unset_read(init_state_name, adjacency, &state_uses, param_name) {
            warnings.push(Warning::critical(format!(
                "Please ensure the value of parameter \"{param_name}\" is set before using it in \
                 \"{state_name}\"."
            )));
        }
    }
    warnings
}

/// Breadth-first walk that stops at states setting the param and returns
/// the first state that reads it.
fn first_unset_read<'a>(
    init_state_name: &'a str,
    adjacency: &Adjacency<'a>,
    state_uses: &BTreeMap<&str, Vec<ParamUse>>,
    param_name: &str,
) -> Option<&'a str> {
    let action_at = |state_name: &str| {
        state_uses
            .get(state_name)
            .and_then(|uses| first_action(uses, param_name))
    };

    let mut seen = BTreeSet::from([init_state_name]);
    let mut queue = VecDeque::new();
    match action_at(init_state_name) {
        Some(ParamAction::Get) => return Some(init_state_name),
        Some(ParamAction::Set) => {}
        None => queue.push_back(init_state_name),
    }

    while let Some(current) = queue.pop_front() {
        for next in adjacency.get(current).into_iter().flatten() {
            if !seen.insert(*next) {
                continue;
            }
            match action_at(next) {
                Some(ParamAction::Get) => return Some(*next),
                Some(ParamAction::Set) => {}
                None => queue.push_back(*next),
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
