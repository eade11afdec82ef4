use super::types::ChangeRecord;
use crate::states::NewStateTemplate;
use expl_core::{ContentItem, ExplorationDocument, GadgetData, Handler, ParamChange};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayRejection {
    #[error("state `{0}` already exists")]
    StateExists(String),
    #[error("state `{0}` does not exist")]
    StateNotFound(String),
    #[error("the initial state `{0}` cannot be deleted")]
    InitialStateDeletion(String),
    #[error("new initial state `{0}` is not an existing state")]
    InitStateNotFound(String),
    #[error("gadget `{0}` already exists")]
    GadgetExists(String),
    #[error("gadget `{0}` does not exist")]
    GadgetNotFound(String),
    #[error("panel `{0}` does not exist")]
    PanelNotFound(String),
    #[error("property `{0}` cannot be replayed")]
    UnsupportedProperty(String),
    #[error("invalid value for `{property}`: {reason}")]
    InvalidValue { property: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("change #{index} rejected: {rejection}")]
pub struct ReplayError {
    pub index: usize,
    pub rejection: ReplayRejection,
}

/// Replays `changes` in order on a copy of `document`. Either every change
/// applies or the original document is left as it was.
pub fn apply_change_list(
    document: &ExplorationDocument,
    changes: &[ChangeRecord],
    template: &NewStateTemplate,
) -> Result<ExplorationDocument, ReplayError> {
    let mut out = document.clone();
    for (index, change) in changes.iter().enumerate() {
        apply_change(&mut out, change, template)
            .map_err(|rejection| ReplayError { index, rejection })?;
    }
    Ok(out)
}

fn apply_change(
    document: &mut ExplorationDocument,
    change: &ChangeRecord,
    template: &NewStateTemplate,
) -> Result<(), ReplayRejection> {
    match change {
        ChangeRecord::AddState { state_name } => {
            if document.states.contains_key(state_name) {
                return Err(ReplayRejection::StateExists(state_name.clone()));
            }
            document
                .states
                .insert(state_name.clone(), template.instantiate(state_name));
        }
        ChangeRecord::RenameState {
            old_state_name,
            new_state_name,
        } => {
            if document.states.contains_key(new_state_name) {
                return Err(ReplayRejection::StateExists(new_state_name.clone()));
            }
            let Some(state) = document.states.remove(old_state_name) else {
                return Err(ReplayRejection::StateNotFound(old_state_name.clone()));
            };
            document.states.insert(new_state_name.clone(), state);
            for state in document.states.values_mut() {
                state.redirect_destinations(old_state_name, new_state_name);
            }
            if document.init_state_name == *old_state_name {
                document.init_state_name = new_state_name.clone();
            }
        }
        ChangeRecord::DeleteState { state_name } => {
            if document.init_state_name == *state_name {
                return Err(ReplayRejection::InitialStateDeletion(state_name.clone()));
            }
            if document.states.remove(state_name).is_none() {
                return Err(ReplayRejection::StateNotFound(state_name.clone()));
            }
            for (other_name, state) in document.states.iter_mut() {
                state.redirect_destinations(state_name, other_name);
            }
        }
        ChangeRecord::EditStateProperty {
            state_name,
            property_name,
            new_value,
            ..
        } => {
            let Some(state) = document.states.get_mut(state_name) else {
                return Err(ReplayRejection::StateNotFound(state_name.clone()));
            };
            match property_name.as_str() {
                "widget_id" => {
                    state.interaction.id = decode::<Option<String>>(property_name, new_value)?
                }
                "widget_customization_args" => {
                    state.interaction.customization_args =
                        decode::<Map<String, Value>>(property_name, new_value)?
                }
                "widget_handlers" => {
                    state.interaction.handlers = decode::<Vec<Handler>>(property_name, new_value)?
                }
                "content" => state.content = decode::<Vec<ContentItem>>(property_name, new_value)?,
                "param_changes" => {
                    state.param_changes = decode::<Vec<ParamChange>>(property_name, new_value)?
                }
                _ => return Err(ReplayRejection::UnsupportedProperty(property_name.clone())),
            }
        }
        ChangeRecord::EditExplorationProperty {
            property_name,
            new_value,
            ..
        } => apply_exploration_property(document, property_name, new_value)?,
        ChangeRecord::AddGadget {
            gadget_dict,
            panel_name,
        } => {
            if find_gadget_mut(document, &gadget_dict.gadget_name).is_some() {
                return Err(ReplayRejection::GadgetExists(gadget_dict.gadget_name.clone()));
            }
            let Some(panel) = document.skin_customizations.panels_contents.get_mut(panel_name)
            else {
                return Err(ReplayRejection::PanelNotFound(panel_name.clone()));
            };
            panel.push(gadget_dict.clone());
        }
        ChangeRecord::RenameGadget {
            old_gadget_name,
            new_gadget_name,
        } => {
            if find_gadget_mut(document, new_gadget_name).is_some() {
                return Err(ReplayRejection::GadgetExists(new_gadget_name.clone()));
            }
            let Some(gadget) = find_gadget_mut(document, old_gadget_name) else {
                return Err(ReplayRejection::GadgetNotFound(old_gadget_name.clone()));
            };
            gadget.gadget_name = new_gadget_name.clone();
        }
        ChangeRecord::DeleteGadget { gadget_name } => {
            let mut removed = false;
            for panel in document.skin_customizations.panels_contents.values_mut() {
                let before = panel.len();
                panel.retain(|gadget| gadget.gadget_name != *gadget_name);
                removed |= panel.len() != before;
            }
            if !removed {
                return Err(ReplayRejection::GadgetNotFound(gadget_name.clone()));
            }
        }
        ChangeRecord::EditGadgetProperty {
            gadget_name,
            property_name,
            new_value,
            ..
        } => {
            let Some(gadget) = find_gadget_mut(document, gadget_name) else {
                return Err(ReplayRejection::GadgetNotFound(gadget_name.clone()));
            };
            match property_name.as_str() {
                "visible_in_states" => {
                    gadget.visible_in_states = decode::<Vec<String>>(property_name, new_value)?
                }
                "customization_args" => {
                    gadget.customization_args =
                        decode::<Map<String, Value>>(property_name, new_value)?
                }
                _ => return Err(ReplayRejection::UnsupportedProperty(property_name.clone())),
            }
        }
    }
    Ok(())
}

fn apply_exploration_property(
    document: &mut ExplorationDocument,
    property_name: &str,
    new_value: &Value,
) -> Result<(), ReplayRejection> {
    match property_name {
        "title" => document.title = decode(property_name, new_value)?,
        "category" => document.category = decode(property_name, new_value)?,
        "objective" => document.objective = decode(property_name, new_value)?,
        "language_code" => document.language_code = decode(property_name, new_value)?,
        "tags" => document.tags = decode(property_name, new_value)?,
        "param_specs" => document.param_specs = decode(property_name, new_value)?,
        "param_changes" => document.param_changes = decode(property_name, new_value)?,
        "default_skin_id" => document.default_skin_id = decode(property_name, new_value)?,
        "init_state_name" => {
            let init_state_name: String = decode(property_name, new_value)?;
            if !document.states.contains_key(&init_state_name) {
                return Err(ReplayRejection::InitStateNotFound(init_state_name));
            }
            document.init_state_name = init_state_name;
        }
        _ => return Err(ReplayRejection::UnsupportedProperty(property_name.to_string())),
    }
    Ok(())
}

fn find_gadget_mut<'a>(
    document: &'a mut ExplorationDocument,
    gadget_name: &str,
) -> Option<&'a mut GadgetData> {
    document
        .skin_customizations
        .panels_contents
        .values_mut()
        .flat_map(|panel| panel.iter_mut())
        .find(|gadget| gadget.gadget_name == gadget_name)
}

fn decode<T: DeserializeOwned>(property_name: &str, value: &Value) -> Result<T, ReplayRejection> {
    serde_json::from_value::<T>(value.clone()).map_err(|error| ReplayRejection::InvalidValue {
        property: property_name.to_string(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;
