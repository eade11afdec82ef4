use super::panels::{AcceptAllPanels, PanelValidator};
use crate::confirm::{Confirmation, ConfirmationDialog, DeleteOutcome};
use crate::context::EditContext;
use crate::signals::{EditorSignal, SignalBus};
use expl_core::{normalize_whitespace, GadgetData, NameError, NamingRules, SkinCustomizations};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum GadgetEditError {
    #[error("panel `{0}` does not exist")]
    PanelNotFound(String),
    #[error("a gadget named `{0}` already exists")]
    AlreadyExists(String),
    #[error("gadget `{0}` does not exist")]
    NotFound(String),
    #[error("gadget `{gadget_name}` is not in panel `{panel_name}`")]
    NotInPanel {
        gadget_name: String,
        panel_name: String,
    },
    #[error("invalid gadget name `{name}`: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: NameError,
    },
    #[error("panel `{panel_name}` rejected the change: {reason}")]
    PanelRejected { panel_name: String, reason: String },
    #[error("encode gadget property `{name}` failed: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    ChangeList(#[from] crate::changes::ChangeListError),
}

/// Gadgets keyed by name plus the ordered gadget names of every panel. Every
/// gadget sits in exactly one panel.
#[derive(Debug)]
pub struct GadgetStore {
    gadgets: BTreeMap<String, GadgetData>,
    panels: BTreeMap<String, Vec<String>>,
    naming: NamingRules,
    panel_validator: Box<dyn PanelValidator>,
}

impl Default for GadgetStore {
    fn default() -> Self {
        Self::new(NamingRules::default(), Box::new(AcceptAllPanels))
    }
}

impl GadgetStore {
    pub fn new(naming: NamingRules, panel_validator: Box<dyn PanelValidator>) -> Self {
        Self {
            gadgets: BTreeMap::new(),
            panels: BTreeMap::new(),
            naming,
            panel_validator,
        }
    }

    pub fn init(&mut self, signals: &mut SignalBus, skin: &SkinCustomizations) {
        self.gadgets.clear();
        self.panels.clear();
        for (panel_name, contents) in &skin.panels_contents {
            let names = contents
                .iter()
                .map(|gadget| {
                    self.gadgets
                        .insert(gadget.gadget_name.clone(), gadget.clone());
                    gadget.gadget_name.clone()
                })
                .collect();
            self.panels.insert(panel_name.clone(), names);
        }
        info!(
            gadgets = self.gadgets.len(),
            panels = self.panels.len(),
            "gadgets initialized"
        );
        signals.emit(EditorSignal::GadgetsChangedOrInitialized);
    }

    /// `gadget_id` itself when free, otherwise the first free of `id2`, `id3`, ...
    pub fn unique_gadget_name(&self, gadget_id: &str) -> String {
        if !self.gadgets.contains_key(gadget_id) {
            return gadget_id.to_string();
        }
        (2u64..)
            .map(|suffix| format!("{gadget_id}{suffix}"))
            .find(|candidate| !self.gadgets.contains_key(candidate))
            .unwrap_or_else(|| gadget_id.to_string())
    }

    pub fn gadgets(&self) -> BTreeMap<String, GadgetData> {
        self.gadgets.clone()
    }

    pub fn panels(&self) -> BTreeMap<String, Vec<String>> {
        self.panels.clone()
    }

    pub fn gadget(&self, gadget_name: &str) -> Option<GadgetData> {
        self.gadgets.get(gadget_name).cloned()
    }

    pub fn gadget_names_in_panel(&self, panel_name: &str) -> Option<Vec<String>> {
        let names = self.panels.get(panel_name).cloned();
        if names.is_none() {
            debug!(panel_name, "requested contents of unknown panel");
        }
        names
    }

    pub fn panel_of(&self, gadget_name: &str) -> Option<&str> {
        self.panels
            .iter()
            .find(|(_, names)| names.iter().any(|name| name == gadget_name))
            .map(|(panel_name, _)| panel_name.as_str())
    }

    /// Rebuilds the panel contents in document form.
    pub fn skin_customizations(&self) -> SkinCustomizations {
        SkinCustomizations {
            panels_contents: self
                .panels
                .iter()
                .map(|(panel_name, names)| {
                    let gadgets = names
                        .iter()
                        .filter_map(|name| self.gadgets.get(name).cloned())
                        .collect();
                    (panel_name.clone(), gadgets)
                })
                .collect(),
        }
    }

    pub fn add_gadget(
        &mut self,
        ctx: &mut EditContext,
        gadget: GadgetData,
        panel_name: &str,
    ) -> Result<(), GadgetEditError> {
        let Some(panel) = self.panels.get(panel_name) else {
            warn!(panel_name, "attempted to add to unknown panel");
            return Err(GadgetEditError::PanelNotFound(panel_name.to_string()));
        };
        self.check_new_gadget_name(&gadget.gadget_name)?;

        let mut proposed = panel.clone();
        proposed.push(gadget.gadget_name.clone());
        self.check_panel(panel_name, &proposed)?;

        ctx.changes.add_gadget(&gadget, panel_name);
        self.panels.insert(panel_name.to_string(), proposed);
        info!(gadget_name = %gadget.gadget_name, panel_name, "gadget added");
        self.gadgets.insert(gadget.gadget_name.clone(), gadget);
        ctx.signals.emit(EditorSignal::GadgetsChangedOrInitialized);
        Ok(())
    }

    /// Updates visibility and customization args only, recording one change
    /// per field that differs. Use rename/move for the name or panel.
    pub fn update_gadget(
        &mut self,
        ctx: &mut EditContext,
        gadget: &GadgetData,
    ) -> Result<usize, GadgetEditError> {
        let Some(current) = self.gadgets.get(&gadget.gadget_name) else {
            warn!(gadget_name = %gadget.gadget_name, "attempted to update unknown gadget");
            return Err(GadgetEditError::NotFound(gadget.gadget_name.clone()));
        };

        let mut pending = Vec::new();
        if current.customization_args != gadget.customization_args {
            pending.push((
                "customization_args",
                encode("customization_args", &gadget.customization_args)?,
                encode("customization_args", &current.customization_args)?,
            ));
        }
        if current.visible_in_states != gadget.visible_in_states {
            pending.push((
                "visible_in_states",
                encode("visible_in_states", &gadget.visible_in_states)?,
                encode("visible_in_states", &current.visible_in_states)?,
            ));
        }
        if pending.is_empty() {
            return Ok(0);
        }

        let recorded = pending.len();
        for (property_name, new_value, old_value) in pending {
            debug!(gadget_name = %gadget.gadget_name, property_name, "updating gadget");
            ctx.changes
                .edit_gadget_property(&gadget.gadget_name, property_name, new_value, old_value)?;
        }
        if let Some(current) = self.gadgets.get_mut(&gadget.gadget_name) {
            current.customization_args = gadget.customization_args.clone();
            current.visible_in_states = gadget.visible_in_states.clone();
        }
        ctx.signals.emit(EditorSignal::GadgetsChangedOrInitialized);
        Ok(recorded)
    }

    pub fn delete_gadget(
        &mut self,
        ctx: &mut EditContext,
        dialog: &mut dyn ConfirmationDialog,
        gadget_name: &str,
    ) -> Result<DeleteOutcome, GadgetEditError> {
        if !self.gadgets.contains_key(gadget_name) {
            warn!(gadget_name, "attempted to delete unknown gadget");
            return Err(GadgetEditError::NotFound(gadget_name.to_string()));
        }
        if dialog.confirm(gadget_name) == Confirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.gadgets.remove(gadget_name);
        for names in self.panels.values_mut() {
            names.retain(|name| name != gadget_name);
        }
        ctx.changes.delete_gadget(gadget_name);
        ctx.signals.emit(EditorSignal::GadgetsChangedOrInitialized);
        info!(gadget_name, "gadget deleted");
        Ok(DeleteOutcome::Deleted)
    }

    pub fn rename_gadget(
        &mut self,
        ctx: &mut EditContext,
        old_gadget_name: &str,
        new_gadget_name: &str,
    ) -> Result<String, GadgetEditError> {
        let new_gadget_name = normalize_whitespace(new_gadget_name);
        self.check_new_gadget_name(&new_gadget_name)?;
        let Some(mut gadget) = self.gadgets.remove(old_gadget_name) else {
            warn!(old_gadget_name, "attempted to rename unknown gadget");
            return Err(GadgetEditError::NotFound(old_gadget_name.to_string()));
        };

        gadget.gadget_name = new_gadget_name.clone();
        self.gadgets.insert(new_gadget_name.clone(), gadget);
        for names in self.panels.values_mut() {
            if let Some(slot) = names.iter_mut().find(|name| *name == old_gadget_name) {
                *slot = new_gadget_name.clone();
            }
        }
        ctx.changes.rename_gadget(old_gadget_name, &new_gadget_name);
        ctx.signals.emit(EditorSignal::GadgetsChangedOrInitialized);
        Ok(new_gadget_name)
    }

    /// Moves a gadget to the end of `dest_panel`. When the destination panel
    /// rejects it, the gadget goes back to its original index in
    /// `source_panel`. Panel placement is not part of the change list.
    pub fn move_gadget_between_panels(
        &mut self,
        signals: &mut SignalBus,
        gadget_name: &str,
        source_panel: &str,
        dest_panel: &str,
    ) -> Result<(), GadgetEditError> {
        if !self.panels.contains_key(dest_panel) {
            return Err(GadgetEditError::PanelNotFound(dest_panel.to_string()));
        }
        let Some(source) = self.panels.get_mut(source_panel) else {
            return Err(GadgetEditError::PanelNotFound(source_panel.to_string()));
        };
        let Some(source_index) = source.iter().position(|name| name == gadget_name) else {
            warn!(gadget_name, source_panel, "gadget is not in the source panel");
            return Err(GadgetEditError::NotInPanel {
                gadget_name: gadget_name.to_string(),
                panel_name: source_panel.to_string(),
            });
        };
        source.remove(source_index);

        let dest = self.panels.entry(dest_panel.to_string()).or_default();
        dest.push(gadget_name.to_string());
        if let Err(reason) = self.panel_validator.validate_panel(dest_panel, dest) {
            dest.pop();
            if let Some(source) = self.panels.get_mut(source_panel) {
                source.insert(source_index, gadget_name.to_string());
            }
            warn!(gadget_name, dest_panel, %reason, "move reverted");
            return Err(GadgetEditError::PanelRejected {
                panel_name: dest_panel.to_string(),
                reason,
            });
        }

        signals.emit(EditorSignal::GadgetsChangedOrInitialized);
        Ok(())
    }

    fn check_new_gadget_name(&self, gadget_name: &str) -> Result<(), GadgetEditError> {
        if let Err(source) = self.naming.validate_entity_name(gadget_name) {
            return Err(GadgetEditError::InvalidName {
                name: gadget_name.to_string(),
                source,
            });
        }
        if self.gadgets.contains_key(gadget_name) {
            warn!(gadget_name, "a gadget with this name already exists");
            return Err(GadgetEditError::AlreadyExists(gadget_name.to_string()));
        }
        Ok(())
    }

    fn check_panel(&self, panel_name: &str, gadget_names: &[String]) -> Result<(), GadgetEditError> {
        self.panel_validator
            .validate_panel(panel_name, gadget_names)
            .map_err(|reason| GadgetEditError::PanelRejected {
                panel_name: panel_name.to_string(),
                reason,
            })
    }
}

fn encode<T: Serialize>(name: &str, value: &T) -> Result<serde_json::Value, GadgetEditError> {
    serde_json::to_value(value).map_err(|source| GadgetEditError::Encode {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
