use super::exploration::encode;
use super::tracked::{PropertySpec, SaveOutcome, TrackedProperty};
use super::PropertyError;
use crate::changes::AppendOutcome;
use crate::context::EditContext;
use crate::states::StateGraphStore;
use expl_core::State;
use serde::Serialize;
use std::fmt;

/// Reads and writes one field of a live state record.
pub struct StateAccessor<T> {
    read: fn(&State) -> T,
    write: fn(&mut State, T),
}

impl<T> StateAccessor<T> {
    pub const fn new(read: fn(&State) -> T, write: fn(&mut State, T)) -> Self {
        Self { read, write }
    }
}

impl<T> Clone for StateAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StateAccessor<T> {}

impl<T> fmt::Debug for StateAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateAccessor")
    }
}

/// A tracked property bound to one state. On commit it records an
/// `edit_state_property` change and writes the value back into the store so
/// the live state stays consistent without a reload.
#[derive(Debug, Clone)]
pub struct StateProperty<T> {
    inner: TrackedProperty<T>,
    accessor: StateAccessor<T>,
    state_name: Option<String>,
}

impl<T> StateProperty<T>
where
    T: Clone + PartialEq + Default + Serialize + 'static,
{
    pub fn new(spec: PropertySpec<T>, accessor: StateAccessor<T>) -> Self {
        Self {
            inner: TrackedProperty::new(spec),
            accessor,
            state_name: None,
        }
    }

    pub fn init(&mut self, state_name: &str, state: &State) -> Result<(), PropertyError> {
        self.inner.init(&(self.accessor.read)(state))?;
        self.state_name = Some(state_name.to_string());
        Ok(())
    }

    pub fn state_name(&self) -> Option<&str> {
        self.state_name.as_deref()
    }

    pub fn tracked(&self) -> &TrackedProperty<T> {
        &self.inner
    }

    pub fn displayed(&self) -> &T {
        self.inner.displayed()
    }

    pub fn displayed_mut(&mut self) -> &mut T {
        self.inner.displayed_mut()
    }

    pub fn set_displayed(&mut self, value: T) {
        self.inner.set_displayed(value);
    }

    pub fn saved_memento(&self) -> &T {
        self.inner.saved_memento()
    }

    pub fn has_changed(&self) -> bool {
        self.inner.has_changed()
    }

    pub fn restore_from_memento(&mut self) {
        self.inner.restore_from_memento();
    }

    pub fn save_displayed_value(
        &mut self,
        ctx: &mut EditContext,
        store: &mut StateGraphStore,
    ) -> Result<SaveOutcome, PropertyError> {
        let Some(state_name) = self.state_name.clone() else {
            let name = self.inner.name().ok_or(PropertyError::MissingName)?;
            return Err(PropertyError::NotInitialized(name.to_string()));
        };
        if !store.contains(&state_name) {
            return Err(PropertyError::StateNotFound(state_name));
        }

        let Some(pending) = self.inner.prepare_commit()? else {
            return Ok(SaveOutcome::Discarded);
        };
        let new_value = encode(&pending.name, &pending.new_value)?;
        let old_value = encode(&pending.name, &pending.old_value)?;
        let appended =
            ctx.changes
                .edit_state_property(&state_name, &pending.name, new_value, old_value)?;

        let write = self.accessor.write;
        store.write_state(&mut ctx.signals, &state_name, |state| {
            write(state, pending.new_value)
        });
        self.inner.advance_memento();

        Ok(match appended {
            AppendOutcome::Recorded => SaveOutcome::Recorded,
            AppendOutcome::SuppressedWhileLoading => SaveOutcome::SuppressedWhileLoading,
        })
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
