pub mod interpolation;
pub mod model;
pub mod names;
pub mod warnings;

pub use interpolation::params_from_string;
pub use model::{
    ContentItem, ExplorationDocument, GadgetData, Handler, Interaction, ParamChange, RuleSpec,
    SkinCustomizations, State, END_DEST,
};
pub use names::{normalize_whitespace, NameError, NamingRules};
pub use warnings::{has_critical_warnings, Warning, WarningType};
