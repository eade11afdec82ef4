use super::types::{
    ChangeRecord, EXPLORATION_PROPERTY_NAMES, GADGET_PROPERTY_NAMES, STATE_PROPERTY_NAMES,
};
use expl_core::GadgetData;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Recorded,
    /// A document load was in progress, so the edit was dropped.
    SuppressedWhileLoading,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeListError {
    #[error("invalid exploration property: {0}")]
    InvalidExplorationProperty(String),
    #[error("invalid state property: {0}")]
    InvalidStateProperty(String),
    #[error("invalid gadget property: {0}")]
    InvalidGadgetProperty(String),
    #[error("there are no changes to undo")]
    NothingToUndo,
}

/// Provisional, uncommitted edits since the last save, plus the stack of
/// undone records (most recently undone last).
#[derive(Debug, Clone, Default)]
pub struct ChangeList {
    records: Vec<ChangeRecord>,
    undone: Vec<ChangeRecord>,
    loading: bool,
}

impl ChangeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn add_state(&mut self, state_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::AddState {
            state_name: state_name.to_string(),
        })
    }

    /// The implied change to the initial state name, if any, is recorded
    /// separately and must come after this record.
    pub fn rename_state(&mut self, new_state_name: &str, old_state_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::RenameState {
            old_state_name: old_state_name.to_string(),
            new_state_name: new_state_name.to_string(),
        })
    }

    pub fn delete_state(&mut self, state_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::DeleteState {
            state_name: state_name.to_string(),
        })
    }

    pub fn edit_exploration_property(
        &mut self,
        property_name: &str,
        new_value: Value,
        old_value: Value,
    ) -> Result<AppendOutcome, ChangeListError> {
        if !EXPLORATION_PROPERTY_NAMES.contains(&property_name) {
            warn!(property_name, "rejected edit of unknown exploration property");
            return Err(ChangeListError::InvalidExplorationProperty(
                property_name.to_string(),
            ));
        }
        Ok(self.push(ChangeRecord::EditExplorationProperty {
            property_name: property_name.to_string(),
            new_value,
            old_value,
        }))
    }

    pub fn edit_state_property(
        &mut self,
        state_name: &str,
        property_name: &str,
        new_value: Value,
        old_value: Value,
    ) -> Result<AppendOutcome, ChangeListError> {
        if !STATE_PROPERTY_NAMES.contains(&property_name) {
            warn!(property_name, "rejected edit of unknown state property");
            return Err(ChangeListError::InvalidStateProperty(property_name.to_string()));
        }
        Ok(self.push(ChangeRecord::EditStateProperty {
            state_name: state_name.to_string(),
            property_name: property_name.to_string(),
            new_value,
            old_value,
        }))
    }

    pub fn add_gadget(&mut self, gadget: &GadgetData, panel_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::AddGadget {
            gadget_dict: gadget.clone(),
            panel_name: panel_name.to_string(),
        })
    }

    pub fn rename_gadget(&mut self, old_gadget_name: &str, new_gadget_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::RenameGadget {
            old_gadget_name: old_gadget_name.to_string(),
            new_gadget_name: new_gadget_name.to_string(),
        })
    }

    pub fn delete_gadget(&mut self, gadget_name: &str) -> AppendOutcome {
        self.push(ChangeRecord::DeleteGadget {
            gadget_name: gadget_name.to_string(),
        })
    }

    pub fn edit_gadget_property(
        &mut self,
        gadget_name: &str,
        property_name: &str,
        new_value: Value,
        old_value: Value,
    ) -> Result<AppendOutcome, ChangeListError> {
        if !GADGET_PROPERTY_NAMES.contains(&property_name) {
            warn!(property_name, "rejected edit of unknown gadget property");
            return Err(ChangeListError::InvalidGadgetProperty(property_name.to_string()));
        }
        Ok(self.push(ChangeRecord::EditGadgetProperty {
            gadget_name: gadget_name.to_string(),
            property_name: property_name.to_string(),
            new_value,
            old_value,
        }))
    }

    /// Moves the last record onto the undo stack. Already-applied store
    /// state is not reverted.
    pub fn undo_last_change(&mut self) -> Result<ChangeRecord, ChangeListError> {
        let Some(last) = self.records.pop() else {
            return Err(ChangeListError::NothingToUndo);
        };
        self.undone.push(last.clone());
        Ok(last)
    }

    pub fn discard_all_changes(&mut self) {
        self.records.clear();
        self.undone.clear();
    }

    pub fn change_list(&self) -> Vec<ChangeRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn undone(&self) -> &[ChangeRecord] {
        &self.undone
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_locked_for_editing(&self) -> bool {
        !self.records.is_empty()
    }

    fn push(&mut self, record: ChangeRecord) -> AppendOutcome {
        if self.loading {
            debug!(kind = ?record.kind(), "dropped change recorded during document load");
            return AppendOutcome::SuppressedWhileLoading;
        }
        self.records.push(record);
        self.undone.clear();
        AppendOutcome::Recorded
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
