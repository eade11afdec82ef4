pub mod backend;
pub mod changes;
pub mod config;
pub mod confirm;
pub mod context;
pub mod gadgets;
pub mod graph;
pub mod property;
pub mod registry;
pub mod session;
pub mod signals;
pub mod states;
pub mod warnings;

#[cfg(test)]
mod test_fixtures;

pub use backend::{BackendError, CommitRecord, ExplorationBackend, FileBackend, InMemoryBackend};
pub use changes::{
    apply_change_list, decode_change_jsonl_line, encode_change_jsonl_line, AppendOutcome,
    ChangeKind, ChangeList, ChangeListError, ChangeRecord, ReplayError, ReplayRejection,
    EXPLORATION_PROPERTY_NAMES, GADGET_PROPERTY_NAMES, STATE_PROPERTY_NAMES,
};
pub use config::{
    load_editor_config, validate_editor_config, ConfigIssue, EditorConfig, EditorConfigError,
    EnvPlaceholderError,
};
pub use confirm::{AutoConfirm, Confirmation, ConfirmationDialog, DeleteOutcome};
pub use context::{EditContext, Editability};
pub use gadgets::{
    AcceptAllPanels, CapacityPanelValidator, GadgetEditError, GadgetStore, PanelRule,
    PanelValidator,
};
pub use graph::{compute_graph, GraphCache, GraphData, GraphLink};
pub use property::{
    ExplorationProperties, ExplorationProperty, LanguageCode, PropertyError, PropertySpec,
    PropertySpecBuilder, SaveOutcome, StateAccessor, StateProperties, StateProperty,
    TrackedProperty,
};
pub use registry::{
    BaseRuleSpecValidator, CustomizationArgSpec, InteractionRegistry, InteractionSpec,
    InteractionValidator, InteractiveMapValidator, ValidatorRegistry,
};
pub use session::{EditorSession, SessionError};
pub use signals::{EditorSignal, ObserverId, SignalBus, SignalRecord};
pub use states::{NewStateTemplate, StateEditError, StateGraphStore};
pub use warnings::{compute_warnings, WarningsInput, WarningsService};
