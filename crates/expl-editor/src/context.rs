use crate::changes::ChangeList;
use crate::signals::SignalBus;
use tracing::error;

/// Per-session editing context: the provisional change list, the refresh
/// signal bus and the name of the state currently shown in the editor.
#[derive(Debug, Default)]
pub struct EditContext {
    pub changes: ChangeList,
    pub signals: SignalBus,
    active_state_name: Option<String>,
}

impl EditContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_state_name(&self) -> Option<&str> {
        self.active_state_name.as_deref()
    }

    pub fn set_active_state_name(&mut self, state_name: &str) {
        if state_name.is_empty() {
            error!("invalid active state name: empty");
            return;
        }
        self.active_state_name = Some(state_name.to_string());
    }

    pub(crate) fn clear_active_state_name(&mut self) {
        self.active_state_name = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Editability {
    editable: bool,
    in_tutorial: bool,
}

impl Editability {
    pub fn editable() -> Self {
        Self {
            editable: true,
            in_tutorial: false,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable && !self.in_tutorial
    }

    pub fn is_editable_outside_tutorial(&self) -> bool {
        self.editable
    }

    pub fn mark_editable(&mut self) {
        self.editable = true;
    }

    pub fn mark_not_editable(&mut self) {
        self.editable = false;
    }

    pub fn start_tutorial(&mut self) {
        self.in_tutorial = true;
    }

    pub fn end_tutorial(&mut self) {
        self.in_tutorial = false;
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
