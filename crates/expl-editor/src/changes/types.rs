use expl_core::GadgetData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXPLORATION_PROPERTY_NAMES: &[&str] = &[
    "title",
    "category",
    "objective",
    "language_code",
    "tags",
    "param_specs",
    "param_changes",
    "default_skin_id",
    "init_state_name",
];

pub const STATE_PROPERTY_NAMES: &[&str] = &[
    "widget_id",
    "widget_customization_args",
    "widget_handlers",
    "state_name",
    "content",
    "param_changes",
];

pub const GADGET_PROPERTY_NAMES: &[&str] = &["visible_in_states", "customization_args"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    AddState,
    RenameState,
    DeleteState,
    EditStateProperty,
    EditExplorationProperty,
    AddGadget,
    RenameGadget,
    DeleteGadget,
    EditGadgetProperty,
}

/// One edit command, serialized in the shape the persistence backend replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChangeRecord {
    AddState {
        state_name: String,
    },
    RenameState {
        old_state_name: String,
        new_state_name: String,
    },
    DeleteState {
        state_name: String,
    },
    EditStateProperty {
        state_name: String,
        property_name: String,
        new_value: Value,
        old_value: Value,
    },
    EditExplorationProperty {
        property_name: String,
        new_value: Value,
        old_value: Value,
    },
    AddGadget {
        gadget_dict: GadgetData,
        panel_name: String,
    },
    RenameGadget {
        old_gadget_name: String,
        new_gadget_name: String,
    },
    DeleteGadget {
        gadget_name: String,
    },
    EditGadgetProperty {
        gadget_name: String,
        property_name: String,
        new_value: Value,
        old_value: Value,
    },
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::AddState { .. } => ChangeKind::AddState,
            Self::RenameState { .. } => ChangeKind::RenameState,
            Self::DeleteState { .. } => ChangeKind::DeleteState,
            Self::EditStateProperty { .. } => ChangeKind::EditStateProperty,
            Self::EditExplorationProperty { .. } => ChangeKind::EditExplorationProperty,
            Self::AddGadget { .. } => ChangeKind::AddGadget,
            Self::RenameGadget { .. } => ChangeKind::RenameGadget,
            Self::DeleteGadget { .. } => ChangeKind::DeleteGadget,
            Self::EditGadgetProperty { .. } => ChangeKind::EditGadgetProperty,
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
