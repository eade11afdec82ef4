use super::template::NewStateTemplate;
use crate::confirm::{Confirmation, ConfirmationDialog, DeleteOutcome};
use crate::context::EditContext;
use crate::property::{ExplorationProperty, PropertyError};
use crate::signals::{EditorSignal, SignalBus};
use expl_core::{normalize_whitespace, NameError, NamingRules, State, END_DEST};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StateEditError {
    #[error("invalid state name `{name}`: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: NameError,
    },
    #[error("a state named `{0}` already exists")]
    AlreadyExists(String),
    #[error("state `{0}` does not exist")]
    NotFound(String),
    #[error("the initial state `{0}` cannot be deleted")]
    CannotDeleteInitialState(String),
    #[error("the END state cannot be deleted")]
    CannotDeleteEndState,
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Owns the state mapping and keeps every rule destination pointing at an
/// existing state or END.
#[derive(Debug, Clone, Default)]
pub struct StateGraphStore {
    states: BTreeMap<String, State>,
    template: NewStateTemplate,
    naming: NamingRules,
}

impl StateGraphStore {
    pub fn new(template: NewStateTemplate, naming: NamingRules) -> Self {
        Self {
            states: BTreeMap::new(),
            template,
            naming,
        }
    }

    pub fn set_states(&mut self, signals: &mut SignalBus, states: BTreeMap<String, State>) {
        self.states = states;
        debug!(count = self.states.len(), "state graph initialized");
        signals.emit(EditorSignal::RefreshGraph);
    }

    pub fn states(&self) -> &BTreeMap<String, State> {
        &self.states
    }

    pub fn snapshot(&self) -> BTreeMap<String, State> {
        self.states.clone()
    }

    pub fn state(&self, state_name: &str) -> Option<State> {
        self.states.get(state_name).cloned()
    }

    pub fn state_names(&self) -> Vec<String> {
        self.states.keys().cloned().collect()
    }

    pub fn contains(&self, state_name: &str) -> bool {
        self.states.contains_key(state_name)
    }

    pub fn naming(&self) -> &NamingRules {
        &self.naming
    }

    /// Replaces a state's data wholesale. Nothing is recorded; callers commit
    /// field edits through state properties.
    pub fn set_state(
        &mut self,
        signals: &mut SignalBus,
        state_name: &str,
        state: State,
    ) -> Result<(), StateEditError> {
        let Some(slot) = self.states.get_mut(state_name) else {
            warn!(state_name, "set_state on unknown state");
            return Err(StateEditError::NotFound(state_name.to_string()));
        };
        *slot = state;
        signals.emit(EditorSignal::RefreshGraph);
        Ok(())
    }

    pub fn is_new_state_name_valid(&self, state_name: &str) -> bool {
        self.check_new_state_name(state_name).is_ok()
    }

    pub fn add_state(&mut self, ctx: &mut EditContext, state_name: &str) -> Result<String, StateEditError> {
        let state_name = self.check_new_state_name(state_name)?;
        self.states
            .insert(state_name.clone(), self.template.instantiate(&state_name));
        ctx.changes.add_state(&state_name);
        ctx.signals.emit(EditorSignal::RefreshGraph);
        info!(state_name = %state_name, "state added");
        Ok(state_name)
    }

    /// Deletes a state after confirmation. Rules in other states that pointed
    /// at it are redirected to the referring state itself.
    pub fn delete_state(
        &mut self,
        ctx: &mut EditContext,
        init_state_name: &ExplorationProperty<String>,
        dialog: &mut dyn ConfirmationDialog,
        state_name: &str,
    ) -> Result<DeleteOutcome, StateEditError> {
        if state_name == init_state_name.displayed() {
            warn!(state_name, "refused to delete the initial state");
            return Err(StateEditError::CannotDeleteInitialState(state_name.to_string()));
        }
        if state_name == END_DEST {
            warn!("refused to delete the END state");
            return Err(StateEditError::CannotDeleteEndState);
        }
        if !self.states.contains_key(state_name) {
            warn!(state_name, "delete requested for unknown state");
            return Err(StateEditError::NotFound(state_name.to_string()));
        }
        if dialog.confirm(state_name) == Confirmation::Cancelled {
            debug!(state_name, "state deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.states.remove(state_name);
        for (other_name, state) in self.states.iter_mut() {
            state.redirect_destinations(state_name, other_name);
        }
        ctx.changes.delete_state(state_name);

        if ctx.active_state_name() == Some(state_name) {
            let fallback = init_state_name.saved_memento().clone();
            if fallback.is_empty() {
                ctx.clear_active_state_name();
            } else {
                ctx.set_active_state_name(&fallback);
            }
        }

        ctx.signals.emit(EditorSignal::RefreshGraph);
        ctx.signals.emit(EditorSignal::RefreshStateEditor);
        info!(state_name, "state deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Renames a state and rewrites every destination that pointed at it.
    /// When the renamed state was the saved initial state, the initial-state
    /// property is committed after the rename record and any unsaved edit of
    /// it is put back. An unsaved edit naming the old state follows the rename
    /// without being recorded.
    pub fn rename_state(
        &mut self,
        ctx: &mut EditContext,
        init_state_name: &mut ExplorationProperty<String>,
        old_state_name: &str,
        new_state_name: &str,
    ) -> Result<String, StateEditError> {
        if !self.states.contains_key(old_state_name) {
            warn!(old_state_name, "rename requested for unknown state");
            return Err(StateEditError::NotFound(old_state_name.to_string()));
        }
        let new_state_name = self.check_new_state_name(new_state_name)?;

        if let Some(state) = self.states.remove(old_state_name) {
            self.states.insert(new_state_name.clone(), state);
        }
        for state in self.states.values_mut() {
            state.redirect_destinations(old_state_name, &new_state_name);
        }

        ctx.set_active_state_name(&new_state_name);
        ctx.changes.rename_state(&new_state_name, old_state_name);

        if init_state_name.saved_memento() == old_state_name {
            let pending = init_state_name
                .has_changed()
                .then(|| init_state_name.displayed().clone());
            init_state_name.set_displayed(new_state_name.clone());
            init_state_name.save_displayed_value(ctx)?;
            if let Some(pending) = pending {
                init_state_name.set_displayed(pending);
            }
        } else if init_state_name.displayed() == old_state_name {
            init_state_name.set_displayed(new_state_name.clone());
        }

        ctx.signals.emit(EditorSignal::RefreshGraph);
        info!(old_state_name, new_state_name = %new_state_name, "state renamed");
        Ok(new_state_name)
    }

    pub(crate) fn write_state(
        &mut self,
        signals: &mut SignalBus,
        state_name: &str,
        write: impl FnOnce(&mut State),
    ) -> bool {
        let Some(state) = self.states.get_mut(state_name) else {
            return false;
        };
        write(state);
        signals.emit(EditorSignal::RefreshGraph);
        true
    }

    fn check_new_state_name(&self, state_name: &str) -> Result<String, StateEditError> {
        let normalized = normalize_whitespace(state_name);
        if let Err(source) = self.naming.validate_state_name(&normalized) {
            warn!(state_name, error = %source, "rejected state name");
            return Err(StateEditError::InvalidName {
                name: state_name.to_string(),
                source,
            });
        }
        if self.states.contains_key(&normalized) {
            warn!(state_name = %normalized, "a state with this name already exists");
            return Err(StateEditError::AlreadyExists(normalized));
        }
        Ok(normalized)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
