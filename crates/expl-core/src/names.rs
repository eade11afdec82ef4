use crate::model::END_DEST;
use regex::Regex;
use serde::{Deserialize, Serialize};

const WHITESPACE_RUN_PATTERN: &str = r"\s+";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRules {
    #[serde(default = "default_max_state_name_length")]
    pub max_state_name_length: usize,
    #[serde(default = "default_invalid_name_chars")]
    pub invalid_name_chars: String,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            max_state_name_length: default_max_state_name_length(),
            invalid_name_chars: default_invalid_name_chars(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("please enter a non-empty name")]
    Empty,
    #[error("invalid input: names cannot contain `{0}`")]
    InvalidCharacter(char),
    #[error("state names must be at most {max} characters long")]
    TooLong { max: usize },
    #[error("`{0}` is a reserved name")]
    Reserved(String),
}

impl NamingRules {
    /// Entity names (titles, categories, gadget names) must be non-empty and
    /// avoid the reserved characters.
    pub fn validate_entity_name(&self, name: &str) -> Result<(), NameError> {
        let normalized = normalize_whitespace(name);
        if normalized.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(invalid) = normalized
            .chars()
            .find(|ch| self.invalid_name_chars.contains(*ch) || ch.is_control())
        {
            return Err(NameError::InvalidCharacter(invalid));
        }
        Ok(())
    }

    pub fn validate_state_name(&self, name: &str) -> Result<(), NameError> {
        self.validate_entity_name(name)?;
        let normalized = normalize_whitespace(name);
        if normalized.chars().count() > self.max_state_name_length {
            return Err(NameError::TooLong {
                max: self.max_state_name_length,
            });
        }
        if normalized == END_DEST {
            return Err(NameError::Reserved(normalized));
        }
        Ok(())
    }
}

/// Trims the input and collapses every internal whitespace run to one space.
pub fn normalize_whitespace(input: &str) -> String {
    let pattern = Regex::new(WHITESPACE_RUN_PATTERN).expect("valid regex");
    pattern.replace_all(input.trim(), " ").into_owned()
}

fn default_max_state_name_length() -> usize {
    50
}

fn default_invalid_name_chars() -> String {
    ":#/|_%<>[]{}\\".to_string()
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
