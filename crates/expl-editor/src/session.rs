use crate::backend::{BackendError, ExplorationBackend};
use crate::changes::{ChangeListError, ChangeRecord};
use crate::config::EditorConfig;
use crate::confirm::{ConfirmationDialog, DeleteOutcome};
use crate::context::{EditContext, Editability};
use crate::gadgets::{GadgetEditError, GadgetStore};
use crate::graph::{GraphCache, GraphData};
use crate::property::{
    ExplorationProperties, ExplorationProperty, PropertyError, SaveOutcome, StateProperties,
    StateProperty,
};
use crate::registry::{InteractionRegistry, ValidatorRegistry};
use crate::signals::{EditorSignal, SignalBus};
use crate::states::{StateEditError, StateGraphStore};
use crate::warnings::{WarningsInput, WarningsService};
use expl_core::{ExplorationDocument, GadgetData, State, Warning};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the exploration cannot be edited in this session")]
    NotEditable,
    #[error("no exploration has been loaded")]
    NotLoaded,
    #[error("state `{0}` does not exist")]
    UnknownState(String),
    #[error("invalid tag pattern: {0}")]
    TagPattern(#[from] regex::Error),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    State(#[from] StateEditError),
    #[error(transparent)]
    Gadget(#[from] GadgetEditError),
    #[error(transparent)]
    ChangeList(#[from] ChangeListError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// One editing session over one exploration: the stores, tracked
/// properties, change list, derived graph and warnings, plus the last
/// document snapshot received from the backend.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    ctx: EditContext,
    editability: Editability,
    properties: ExplorationProperties,
    state_properties: StateProperties,
    states: StateGraphStore,
    gadgets: GadgetStore,
    interactions: InteractionRegistry,
    validators: ValidatorRegistry,
    graph: GraphCache,
    warnings: WarningsService,
    warnings_seq: u64,
    document: Option<ExplorationDocument>,
}

impl EditorSession {
    /// Sessions start editable.
    pub fn new(config: EditorConfig) -> Result<Self, SessionError> {
        let tag_pattern = config.tag_regex()?;
        let properties =
            ExplorationProperties::new(&config.naming, &tag_pattern, &config.language_codes);
        Ok(Self {
            states: StateGraphStore::new(config.new_state_template.clone(), config.naming.clone()),
            gadgets: GadgetStore::new(config.naming.clone(), config.panel_validator()),
            interactions: config.interactions.clone(),
            validators: ValidatorRegistry::default(),
            ctx: EditContext::new(),
            editability: Editability::editable(),
            properties,
            state_properties: StateProperties::new(),
            graph: GraphCache::new(),
            warnings: WarningsService::new(),
            warnings_seq: 0,
            document: None,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Populates every store from `document`. Nothing is recorded while the
    /// document is being applied, and the change list starts empty.
    pub fn load_document(&mut self, document: ExplorationDocument) -> Result<(), SessionError> {
        self.ctx.changes.set_loading(true);
        let populated = self.populate(&document);
        self.ctx.changes.set_loading(false);
        populated?;

        info!(
            version = document.version,
            states = document.states.len(),
            "exploration loaded"
        );
        self.document = Some(document);
        self.update_warnings();
        Ok(())
    }

    fn populate(&mut self, document: &ExplorationDocument) -> Result<(), SessionError> {
        self.ctx.signals.clear_history();
        self.properties.init_from_document(document)?;
        self.states
            .set_states(&mut self.ctx.signals, document.states.clone());
        self.gadgets
            .init(&mut self.ctx.signals, &document.skin_customizations);
        self.ctx.changes.discard_all_changes();
        self.graph.invalidate();

        if document.init_state_name.is_empty() {
            self.ctx.clear_active_state_name();
        } else {
            self.ctx.set_active_state_name(&document.init_state_name);
        }
        self.refresh_state_properties()
    }

    pub fn reload(&mut self, backend: &mut dyn ExplorationBackend) -> Result<(), SessionError> {
        let document = backend.load()?;
        self.load_document(document)
    }

    /// Sends the change list to the backend. On success the returned
    /// document replaces every local copy; on failure nothing changes.
    pub fn save(
        &mut self,
        backend: &mut dyn ExplorationBackend,
        commit_message: &str,
    ) -> Result<&ExplorationDocument, SessionError> {
        self.require_editable()?;
        let version = self.document.as_ref().ok_or(SessionError::NotLoaded)?.version;
        let change_list = self.ctx.changes.change_list();
        let updated = backend.save(&change_list, commit_message, version)?;
        self.load_document(updated)?;
        self.document.as_ref().ok_or(SessionError::NotLoaded)
    }

    pub fn document(&self) -> Option<&ExplorationDocument> {
        self.document.as_ref()
    }

    /// The current exploration assembled from the live stores and the
    /// saved values of the exploration properties.
    pub fn current_document(&self) -> Option<ExplorationDocument> {
        let base = self.document.as_ref()?;
        Some(ExplorationDocument {
            version: base.version,
            title: self.properties.title.saved_memento().clone(),
            category: self.properties.category.saved_memento().clone(),
            objective: self.properties.objective.saved_memento().clone(),
            language_code: self.properties.language_code.saved_memento().clone(),
            tags: self.properties.tags.saved_memento().clone(),
            param_specs: self.properties.param_specs.saved_memento().clone(),
            param_changes: self.properties.param_changes.saved_memento().clone(),
            default_skin_id: self.properties.default_skin_id.saved_memento().clone(),
            init_state_name: self.properties.init_state_name.saved_memento().clone(),
            states: self.states.snapshot(),
            skin_customizations: self.gadgets.skin_customizations(),
        })
    }

    pub fn editability(&self) -> Editability {
        self.editability
    }

    pub fn editability_mut(&mut self) -> &mut Editability {
        &mut self.editability
    }

    pub fn context(&self) -> &EditContext {
        &self.ctx
    }

    pub fn signals_mut(&mut self) -> &mut SignalBus {
        &mut self.ctx.signals
    }

    pub fn active_state_name(&self) -> Option<&str> {
        self.ctx.active_state_name()
    }

    pub fn set_active_state_name(&mut self, state_name: &str) -> Result<(), SessionError> {
        if !self.states.contains(state_name) {
            return Err(SessionError::UnknownState(state_name.to_string()));
        }
        self.ctx.set_active_state_name(state_name);
        self.refresh_state_properties()
    }

    pub fn undo_last_change(&mut self) -> Result<ChangeRecord, SessionError> {
        Ok(self.ctx.changes.undo_last_change()?)
    }

    pub fn discard_all_changes(&mut self) {
        self.ctx.changes.discard_all_changes();
    }

    pub fn change_list(&self) -> Vec<ChangeRecord> {
        self.ctx.changes.change_list()
    }

    pub fn is_locked_for_editing(&self) -> bool {
        self.ctx.changes.is_locked_for_editing()
    }

    pub fn graph_data(&mut self) -> Option<&GraphData> {
        self.graph.graph_data(
            &self.ctx.signals,
            self.properties.init_state_name.saved_memento(),
            self.states.states(),
            &self.interactions,
        )
    }

    pub fn update_warnings(&mut self) -> &[Warning] {
        let graph = self.graph.graph_data(
            &self.ctx.signals,
            self.properties.init_state_name.saved_memento(),
            self.states.states(),
            &self.interactions,
        );
        self.warnings_seq = self.ctx.signals.next_seq();
        let input = WarningsInput {
            states: self.states.states(),
            graph,
            exploration_param_changes: self.properties.param_changes.saved_memento(),
            objective: self.properties.objective.displayed(),
            validators: &self.validators,
        };
        self.warnings.update(&input)
    }

    pub fn warnings(&self) -> &WarningsService {
        &self.warnings
    }

    pub fn interactions(&self) -> &InteractionRegistry {
        &self.interactions
    }

    pub fn validators_mut(&mut self) -> &mut ValidatorRegistry {
        &mut self.validators
    }

    pub fn properties(&self) -> &ExplorationProperties {
        &self.properties
    }

    /// Displayed values may be edited freely; they are only recorded by
    /// [`EditorSession::commit_property`].
    pub fn properties_mut(&mut self) -> &mut ExplorationProperties {
        &mut self.properties
    }

    pub fn commit_property<T>(
        &mut self,
        select: impl FnOnce(&mut ExplorationProperties) -> &mut ExplorationProperty<T>,
    ) -> Result<SaveOutcome, SessionError>
    where
        T: Clone + PartialEq + Default + Serialize + 'static,
    {
        self.require_editable()?;
        let outcome = select(&mut self.properties).save_displayed_value(&mut self.ctx)?;
        self.sync_warnings();
        Ok(outcome)
    }

    pub fn state_properties(&self) -> &StateProperties {
        &self.state_properties
    }

    pub fn state_properties_mut(&mut self) -> &mut StateProperties {
        &mut self.state_properties
    }

    pub fn commit_state_property<T>(
        &mut self,
        select: impl FnOnce(&mut StateProperties) -> &mut StateProperty<T>,
    ) -> Result<SaveOutcome, SessionError>
    where
        T: Clone + PartialEq + Default + Serialize + 'static,
    {
        self.require_editable()?;
        let outcome =
            select(&mut self.state_properties).save_displayed_value(&mut self.ctx, &mut self.states)?;
        self.sync_warnings();
        Ok(outcome)
    }

    pub fn states(&self) -> &StateGraphStore {
        &self.states
    }

    pub fn state(&self, state_name: &str) -> Option<State> {
        self.states.state(state_name)
    }

    pub fn set_state(&mut self, state_name: &str, state: State) -> Result<(), SessionError> {
        self.require_editable()?;
        self.states.set_state(&mut self.ctx.signals, state_name, state)?;
        self.sync_warnings();
        if self.ctx.active_state_name() == Some(state_name) {
            self.refresh_state_properties()?;
        }
        Ok(())
    }

    pub fn add_state(&mut self, state_name: &str) -> Result<String, SessionError> {
        self.require_editable()?;
        let added = self.states.add_state(&mut self.ctx, state_name)?;
        self.sync_warnings();
        Ok(added)
    }

    pub fn rename_state(&mut self, old_state_name: &str, new_state_name: &str) -> Result<String, SessionError> {
        self.require_editable()?;
        let renamed = self.states.rename_state(
            &mut self.ctx,
            &mut self.properties.init_state_name,
            old_state_name,
            new_state_name,
        )?;
        self.sync_warnings();
        self.refresh_state_properties()?;
        Ok(renamed)
    }

    pub fn delete_state(
        &mut self,
        dialog: &mut dyn ConfirmationDialog,
        state_name: &str,
    ) -> Result<DeleteOutcome, SessionError> {
        self.require_editable()?;
        let outcome = self.states.delete_state(
            &mut self.ctx,
            &self.properties.init_state_name,
            dialog,
            state_name,
        )?;
        if outcome == DeleteOutcome::Deleted {
            self.sync_warnings();
            self.refresh_state_properties()?;
        }
        Ok(outcome)
    }

    pub fn gadgets(&self) -> &GadgetStore {
        &self.gadgets
    }

    pub fn add_gadget(&mut self, gadget: GadgetData, panel_name: &str) -> Result<(), SessionError> {
        self.require_editable()?;
        Ok(self.gadgets.add_gadget(&mut self.ctx, gadget, panel_name)?)
    }

    pub fn update_gadget(&mut self, gadget: &GadgetData) -> Result<usize, SessionError> {
        self.require_editable()?;
        Ok(self.gadgets.update_gadget(&mut self.ctx, gadget)?)
    }

    pub fn delete_gadget(
        &mut self,
        dialog: &mut dyn ConfirmationDialog,
        gadget_name: &str,
    ) -> Result<DeleteOutcome, SessionError> {
        self.require_editable()?;
        Ok(self.gadgets.delete_gadget(&mut self.ctx, dialog, gadget_name)?)
    }

    pub fn rename_gadget(&mut self, old_gadget_name: &str, new_gadget_name: &str) -> Result<String, SessionError> {
        self.require_editable()?;
        Ok(self
            .gadgets
            .rename_gadget(&mut self.ctx, old_gadget_name, new_gadget_name)?)
    }

    pub fn move_gadget_between_panels(
        &mut self,
        gadget_name: &str,
        source_panel: &str,
        dest_panel: &str,
    ) -> Result<(), SessionError> {
        self.require_editable()?;
        Ok(self.gadgets.move_gadget_between_panels(
            &mut self.ctx.signals,
            gadget_name,
            source_panel,
            dest_panel,
        )?)
    }

    fn require_editable(&self) -> Result<(), SessionError> {
        if self.editability.is_editable() {
            Ok(())
        } else {
            debug!("edit refused: session is not editable");
            Err(SessionError::NotEditable)
        }
    }

    /// Recomputes warnings when the graph or an exploration property was
    /// refreshed since the last pass.
    fn sync_warnings(&mut self) {
        let refreshed = [
            EditorSignal::RefreshGraph,
            EditorSignal::ExplorationPropertyChanged,
        ]
        .into_iter()
        .filter_map(|signal| self.ctx.signals.last_seq(signal))
        .any(|seq| seq >= self.warnings_seq);
        if refreshed {
            self.update_warnings();
        }
    }

    fn refresh_state_properties(&mut self) -> Result<(), SessionError> {
        let active = self
            .ctx
            .active_state_name()
            .and_then(|name| self.states.state(name).map(|state| (name.to_string(), state)));
        match active {
            Some((state_name, state)) => self.state_properties.init_for_state(&state_name, &state)?,
            None => self.state_properties = StateProperties::new(),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
