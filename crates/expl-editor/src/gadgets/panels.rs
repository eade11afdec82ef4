use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRule {
    pub max_gadgets: usize,
}

/// Decides whether a panel's contents still fit after an edit.
pub trait PanelValidator: fmt::Debug {
    fn validate_panel(&self, panel_name: &str, gadget_names: &[String]) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllPanels;

impl PanelValidator for AcceptAllPanels {
    fn validate_panel(&self, _panel_name: &str, _gadget_names: &[String]) -> Result<(), String> {
        Ok(())
    }
}

/// Enforces a per-panel gadget limit. Panels without a rule are unbounded.
#[derive(Debug, Clone, Default)]
pub struct CapacityPanelValidator {
    rules: BTreeMap<String, PanelRule>,
}

impl CapacityPanelValidator {
    pub fn new(rules: BTreeMap<String, PanelRule>) -> Self {
        Self { rules }
    }
}

impl PanelValidator for CapacityPanelValidator {
    fn validate_panel(&self, panel_name: &str, gadget_names: &[String]) -> Result<(), String> {
        let Some(rule) = self.rules.get(panel_name) else {
            return Ok(());
        };
        if gadget_names.len() > rule.max_gadgets {
            return Err(format!(
                "panel holds {} gadget(s) but allows at most {}",
                gadget_names.len(),
                rule.max_gadgets
            ));
        }
        Ok(())
    }
}
