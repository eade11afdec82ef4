mod env;

pub use env::EnvPlaceholderError;

use crate::gadgets::{CapacityPanelValidator, PanelRule, PanelValidator};
use crate::property::LanguageCode;
use crate::registry::InteractionRegistry;
use crate::states::NewStateTemplate;
use env::{expand_env_placeholders, process_env};
use expl_core::NamingRules;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_editor_schema")]
    pub schema: String,
    #[serde(default)]
    pub naming: NamingRules,
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
    #[serde(default = "LanguageCode::defaults")]
    pub language_codes: Vec<LanguageCode>,
    #[serde(default)]
    pub interactions: InteractionRegistry,
    #[serde(default)]
    pub panels: BTreeMap<String, PanelRule>,
    #[serde(default)]
    pub new_state_template: NewStateTemplate,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            schema: default_editor_schema(),
            naming: NamingRules::default(),
            tag_pattern: default_tag_pattern(),
            language_codes: LanguageCode::defaults(),
            interactions: InteractionRegistry::default(),
            panels: BTreeMap::new(),
            new_state_template: NewStateTemplate::default(),
        }
    }
}

impl EditorConfig {
    pub fn tag_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.tag_pattern)
    }

    pub fn panel_validator(&self) -> Box<dyn PanelValidator> {
        Box::new(CapacityPanelValidator::new(self.panels.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub reference: String,
    pub path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorConfigError {
    #[error("read editor config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("editor config parse failed: {0}")]
    Parse(String),
    #[error("editor config placeholder: {0}")]
    Placeholder(#[from] EnvPlaceholderError),
    #[error("editor config validation failed: {0:?}")]
    Validation(Vec<ConfigIssue>),
}

/// On-disk encodings of an editor config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the extension; unknown extensions are sniffed
    /// from the first non-blank character.
    fn detect(path: &Path, text: &str) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ if text.trim_start().starts_with('{') => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    fn decode(self, text: &str) -> Result<EditorConfig, EditorConfigError> {
        match self {
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|error| EditorConfigError::Parse(format!("json: {error}"))),
            ConfigFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|error| EditorConfigError::Parse(format!("yaml: {error}"))),
        }
    }
}

pub fn load_editor_config(path: &Path) -> Result<EditorConfig, EditorConfigError> {
    let text = fs::read_to_string(path).map_err(|source| EditorConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let text = expand_env_placeholders(&text, process_env)?;
    let config = ConfigFormat::detect(path, &text).decode(&text)?;

    match validate_editor_config(&config).as_slice() {
        [] => Ok(config),
        issues => Err(EditorConfigError::Validation(issues.to_vec())),
    }
}

pub fn validate_editor_config(config: &EditorConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::<ConfigIssue>::new();
    if config.schema != default_editor_schema() {
        issues.push(config_issue(
            "editor.config.schema",
            "schema",
            format!(
                "unsupported editor config schema `{}` (expected `{}`)",
                config.schema,
                default_editor_schema()
            ),
        ));
    }
    if config.naming.max_state_name_length == 0 {
        issues.push(config_issue(
            "editor.config.naming.max_state_name_length",
            "naming.max_state_name_length",
            "max_state_name_length must be > 0".to_string(),
        ));
    }
    if let Err(error) = config.tag_regex() {
        issues.push(config_issue(
            "editor.config.tag_pattern",
            "tag_pattern",
            format!("tag_pattern does not compile: {error}"),
        ));
    }

    if config.language_codes.is_empty() {
        issues.push(config_issue(
            "editor.config.language_codes.non_empty",
            "language_codes",
            "editor config must list at least one language code".to_string(),
        ));
    }
    let mut seen_codes = BTreeSet::new();
    for (index, language) in config.language_codes.iter().enumerate() {
        if !seen_codes.insert(language.code.as_str()) {
            issues.push(config_issue(
                "editor.config.language_codes.duplicate",
                &format!("language_codes[{index}].code"),
                format!("language code `{}` is listed more than once", language.code),
            ));
        }
    }

    let template = config.new_state_template.instantiate("");
    if let Some(interaction_id) = template.interaction.id.as_deref() {
        if !config.interactions.contains(interaction_id) {
            issues.push(config_issue(
                "editor.config.new_state_template.interaction",
                "new_state_template.interaction.id",
                format!("template interaction `{interaction_id}` is not a registered interaction"),
            ));
        }
    }

    issues
}

fn config_issue(reference: &str, path: &str, message: String) -> ConfigIssue {
    ConfigIssue {
        reference: reference.to_string(),
        path: path.to_string(),
        message,
    }
}

fn default_editor_schema() -> String {
    "expl-editor/0.0.1".to_string()
}

fn default_tag_pattern() -> String {
    "^[a-z ]+$".to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
