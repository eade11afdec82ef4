#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Asks the author to confirm a destructive operation on the named entity.
pub trait ConfirmationDialog {
    fn confirm(&mut self, entity_name: &str) -> Confirmation;
}

impl<F> ConfirmationDialog for F
where
    F: FnMut(&str) -> Confirmation,
{
    fn confirm(&mut self, entity_name: &str) -> Confirmation {
        self(entity_name)
    }
}

/// Confirms everything. Used by non-interactive front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmationDialog for AutoConfirm {
    fn confirm(&mut self, _entity_name: &str) -> Confirmation {
        Confirmation::Confirmed
    }
}

/// Result of a destructive operation that asked for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}
