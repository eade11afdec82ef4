mod panels;
mod store;

pub use panels::{AcceptAllPanels, CapacityPanelValidator, PanelRule, PanelValidator};
pub use store::{GadgetEditError, GadgetStore};
