use super::exploration::ExplorationProperty;
use super::state::{StateAccessor, StateProperty};
use super::tracked::PropertySpec;
use super::PropertyError;
use expl_core::{
    normalize_whitespace, ContentItem, ExplorationDocument, Handler, NamingRules, ParamChange,
    State,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCode {
    pub code: String,
    pub description: String,
}

impl LanguageCode {
    pub fn new(code: &str, description: &str) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
        }
    }

    pub fn defaults() -> Vec<LanguageCode> {
        vec![
            Self::new("en", "English"),
            Self::new("es", "español"),
            Self::new("fr", "français"),
            Self::new("de", "Deutsch"),
            Self::new("hi", "हिन्दी"),
            Self::new("pt", "português"),
            Self::new("zh", "中文"),
        ]
    }
}

/// The exploration-level properties shown in the settings view.
#[derive(Debug, Clone)]
pub struct ExplorationProperties {
    pub title: ExplorationProperty<String>,
    pub category: ExplorationProperty<String>,
    pub objective: ExplorationProperty<String>,
    pub language_code: ExplorationProperty<String>,
    pub tags: ExplorationProperty<Vec<String>>,
    pub param_specs: ExplorationProperty<Map<String, Value>>,
    pub param_changes: ExplorationProperty<Vec<ParamChange>>,
    pub default_skin_id: ExplorationProperty<String>,
    pub init_state_name: ExplorationProperty<String>,
    language_codes: Vec<LanguageCode>,
}

impl ExplorationProperties {
    pub fn new(naming: &NamingRules, tag_pattern: &Regex, language_codes: &[LanguageCode]) -> Self {
        let known_codes: Vec<String> = language_codes.iter().map(|lc| lc.code.clone()).collect();
        let tag_pattern = tag_pattern.clone();

        Self {
            title: ExplorationProperty::new(entity_name_spec("title", naming)),
            category: ExplorationProperty::new(entity_name_spec("category", naming)),
            objective: ExplorationProperty::new(
                PropertySpec::builder()
                    .name("objective")
                    .normalize(|value: String| normalize_whitespace(&value))
                    .validate(|value: &String| !value.is_empty())
                    .build(),
            ),
            language_code: ExplorationProperty::new(
                PropertySpec::builder()
                    .name("language_code")
                    .validate(move |value: &String| known_codes.contains(value))
                    .build(),
            ),
            tags: ExplorationProperty::new(
                PropertySpec::builder()
                    .name("tags")
                    .normalize(|tags: Vec<String>| {
                        tags.iter().map(|tag| normalize_whitespace(tag)).collect()
                    })
                    .validate(move |tags: &Vec<String>| {
                        tags.iter().all(|tag| tag_pattern.is_match(tag))
                    })
                    .build(),
            ),
            param_specs: ExplorationProperty::new(PropertySpec::named("param_specs")),
            param_changes: ExplorationProperty::new(PropertySpec::named("param_changes")),
            default_skin_id: ExplorationProperty::new(PropertySpec::named("default_skin_id")),
            init_state_name: ExplorationProperty::new(PropertySpec::named("init_state_name")),
            language_codes: language_codes.to_vec(),
        }
    }

    pub fn init_from_document(&mut self, document: &ExplorationDocument) -> Result<(), PropertyError> {
        self.title.init(&document.title)?;
        self.category.init(&document.category)?;
        self.objective.init(&document.objective)?;
        self.language_code.init(&document.language_code)?;
        self.tags.init(&document.tags)?;
        self.param_specs.init(&document.param_specs)?;
        self.param_changes.init(&document.param_changes)?;
        self.default_skin_id.init(&document.default_skin_id)?;
        self.init_state_name.init(&document.init_state_name)?;
        info!(title = %document.title, "exploration properties initialized");
        Ok(())
    }

    pub fn all_language_codes(&self) -> &[LanguageCode] {
        &self.language_codes
    }

    pub fn current_language_description(&self) -> Option<&str> {
        let current = self.language_code.displayed();
        self.language_codes
            .iter()
            .find(|lc| lc.code == *current)
            .map(|lc| lc.description.as_str())
    }
}

fn entity_name_spec(name: &str, naming: &NamingRules) -> PropertySpec<String> {
    let naming = naming.clone();
    PropertySpec::builder()
        .name(name)
        .normalize(|value: String| normalize_whitespace(&value))
        .validate(move |value: &String| naming.validate_entity_name(value).is_ok())
        .build()
}

/// The editable properties of the state currently open in the editor.
#[derive(Debug, Clone)]
pub struct StateProperties {
    pub widget_id: StateProperty<Option<String>>,
    pub widget_customization_args: StateProperty<Map<String, Value>>,
    pub widget_handlers: StateProperty<Vec<Handler>>,
    pub content: StateProperty<Vec<ContentItem>>,
    pub param_changes: StateProperty<Vec<ParamChange>>,
}

impl StateProperties {
    pub fn new() -> Self {
        Self {
            widget_id: StateProperty::new(
                PropertySpec::named("widget_id"),
                StateAccessor::new(
                    |state| state.interaction.id.clone(),
                    |state, value| state.interaction.id = value,
                ),
            ),
            widget_customization_args: StateProperty::new(
                PropertySpec::named("widget_customization_args"),
                StateAccessor::new(
                    |state| state.interaction.customization_args.clone(),
                    |state, value| state.interaction.customization_args = value,
                ),
            ),
            widget_handlers: StateProperty::new(
                PropertySpec::named("widget_handlers"),
                StateAccessor::new(
                    |state| state.interaction.handlers.clone(),
                    |state, value| state.interaction.handlers = value,
                ),
            ),
            content: StateProperty::new(
                PropertySpec::named("content"),
                StateAccessor::new(
                    |state| state.content.clone(),
                    |state, value| state.content = value,
                ),
            ),
            param_changes: StateProperty::new(
                PropertySpec::named("param_changes"),
                StateAccessor::new(
                    |state| state.param_changes.clone(),
                    |state, value| state.param_changes = value,
                ),
            ),
        }
    }

    pub fn init_for_state(&mut self, state_name: &str, state: &State) -> Result<(), PropertyError> {
        self.widget_id.init(state_name, state)?;
        self.widget_customization_args.init(state_name, state)?;
        self.widget_handlers.init(state_name, state)?;
        self.content.init(state_name, state)?;
        self.param_changes.init(state_name, state)?;
        Ok(())
    }

    pub fn state_name(&self) -> Option<&str> {
        self.content.state_name()
    }
}

impl Default for StateProperties {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
