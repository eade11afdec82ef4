use super::PropertyError;
use std::fmt;
use std::sync::Arc;

type Normalizer<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
type Validator<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// The capability bundle of one concrete property: its backend name plus the
/// normalize and validate hooks applied on save.
pub struct PropertySpec<T> {
    name: Option<String>,
    normalize: Normalizer<T>,
    is_valid: Validator<T>,
}

impl<T: 'static> PropertySpec<T> {
    pub fn builder() -> PropertySpecBuilder<T> {
        PropertySpecBuilder {
            name: None,
            normalize: None,
            is_valid: None,
        }
    }

    /// Shorthand for a property with identity normalization and no validation.
    pub fn named(name: impl Into<String>) -> Self {
        Self::builder().name(name).build()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<T> Clone for PropertySpec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            normalize: Arc::clone(&self.normalize),
            is_valid: Arc::clone(&self.is_valid),
        }
    }
}

impl<T> fmt::Debug for PropertySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySpec").field("name", &self.name).finish()
    }
}

pub struct PropertySpecBuilder<T> {
    name: Option<String>,
    normalize: Option<Normalizer<T>>,
    is_valid: Option<Validator<T>>,
}

impl<T: 'static> PropertySpecBuilder<T> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn normalize(mut self, normalize: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        self.normalize = Some(Arc::new(normalize));
        self
    }

    pub fn validate(mut self, is_valid: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.is_valid = Some(Arc::new(is_valid));
        self
    }

    /// A spec built without a name is accepted here; using it fails at `init`.
    pub fn build(self) -> PropertySpec<T> {
        PropertySpec {
            name: self.name,
            normalize: self.normalize.unwrap_or_else(|| Arc::new(|value| value)),
            is_valid: self.is_valid.unwrap_or_else(|| Arc::new(|_| true)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Recorded,
    /// The memento advanced but the change list dropped the record because a
    /// document load was in progress.
    SuppressedWhileLoading,
    /// The normalized value was invalid or unchanged; the displayed value was
    /// restored from the memento.
    Discarded,
}

/// A displayed value bound to the UI and the memento last committed into the
/// change list.
#[derive(Debug, Clone)]
pub struct TrackedProperty<T> {
    spec: PropertySpec<T>,
    displayed: T,
    saved_memento: T,
    initialized: bool,
}

pub(crate) struct PendingCommit<T> {
    pub name: String,
    pub new_value: T,
    pub old_value: T,
}

impl<T> TrackedProperty<T>
where
    T: Clone + PartialEq + Default + 'static,
{
    pub fn new(spec: PropertySpec<T>) -> Self {
        Self {
            spec,
            displayed: T::default(),
            saved_memento: T::default(),
            initialized: false,
        }
    }

    pub fn init(&mut self, value: &T) -> Result<(), PropertyError> {
        self.require_name()?;
        self.displayed = value.clone();
        self.saved_memento = value.clone();
        self.initialized = true;
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.spec.name()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn displayed(&self) -> &T {
        &self.displayed
    }

    pub fn displayed_mut(&mut self) -> &mut T {
        &mut self.displayed
    }

    pub fn set_displayed(&mut self, value: T) {
        self.displayed = value;
    }

    pub fn saved_memento(&self) -> &T {
        &self.saved_memento
    }

    pub fn has_changed(&self) -> bool {
        self.displayed != self.saved_memento
    }

    pub fn restore_from_memento(&mut self) {
        self.displayed = self.saved_memento.clone();
    }

    pub fn is_valid(&self, value: &T) -> bool {
        (self.spec.is_valid)(value)
    }

    /// Normalizes the displayed value and decides whether it should be
    /// recorded. Invalid or unchanged values are discarded.
    pub(crate) fn prepare_commit(&mut self) -> Result<Option<PendingCommit<T>>, PropertyError> {
        let name = self.require_name()?.to_string();
        if !self.initialized {
            return Err(PropertyError::NotInitialized(name));
        }

        let displayed = std::mem::take(&mut self.displayed);
        self.displayed = (self.spec.normalize)(displayed);
        if !(self.spec.is_valid)(&self.displayed) || !self.has_changed() {
            self.restore_from_memento();
            return Ok(None);
        }

        Ok(Some(PendingCommit {
            name,
            new_value: self.displayed.clone(),
            old_value: self.saved_memento.clone(),
        }))
    }

    pub(crate) fn advance_memento(&mut self) {
        self.saved_memento = self.displayed.clone();
    }

    fn require_name(&self) -> Result<&str, PropertyError> {
        self.spec.name().ok_or(PropertyError::MissingName)
    }
}

#[cfg(test)]
#[path = "tracked_test.rs"]
mod tests;
