mod document;
mod gadget;
mod state;

pub use document::ExplorationDocument;
pub use gadget::{GadgetData, SkinCustomizations};
pub use state::{ContentItem, Handler, Interaction, ParamChange, RuleSpec, State, END_DEST};
