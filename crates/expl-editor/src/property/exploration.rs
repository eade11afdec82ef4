use super::tracked::{PropertySpec, SaveOutcome, TrackedProperty};
use super::PropertyError;
use crate::changes::AppendOutcome;
use crate::context::EditContext;
use crate::signals::EditorSignal;
use serde::Serialize;
use tracing::debug;

/// A tracked property of the exploration as a whole. Commits become
/// `edit_exploration_property` records.
#[derive(Debug, Clone)]
pub struct ExplorationProperty<T> {
    inner: TrackedProperty<T>,
}

impl<T> ExplorationProperty<T>
where
    T: Clone + PartialEq + Default + Serialize + 'static,
{
    pub fn new(spec: PropertySpec<T>) -> Self {
        Self {
            inner: TrackedProperty::new(spec),
        }
    }

    pub fn init(&mut self, value: &T) -> Result<(), PropertyError> {
        self.inner.init(value)?;
        debug!(property = self.inner.name(), "exploration property initialized");
        Ok(())
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

    pub fn save_displayed_value(&mut self, ctx: &mut EditContext) -> Result<SaveOutcome, PropertyError> {
        let Some(pending) = self.inner.prepare_commit()? else {
            return Ok(SaveOutcome::Discarded);
        };

        let new_value = encode(&pending.name, &pending.new_value)?;
        let old_value = encode(&pending.name, &pending.old_value)?;
        let appended = ctx
            .changes
            .edit_exploration_property(&pending.name, new_value, old_value)?;
        self.inner.advance_memento();
        ctx.signals.emit(EditorSignal::ExplorationPropertyChanged);

        Ok(match appended {
            AppendOutcome::Recorded => SaveOutcome::Recorded,
            AppendOutcome::SuppressedWhileLoading => SaveOutcome::SuppressedWhileLoading,
        })
    }
}

pub(super) fn encode<T: Serialize>(name: &str, value: &T) -> Result<serde_json::Value, PropertyError> {
    serde_json::to_value(value).map_err(|source| PropertyError::Encode {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "exploration_test.rs"]
mod tests;
