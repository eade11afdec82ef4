use serde::{Deserialize, Serialize};

/// Critical warnings block saving; errors only block publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningType {
    Critical,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub warning_type: WarningType,
    pub message: String,
}

impl Warning {
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            warning_type: WarningType::Critical,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            warning_type: WarningType::Error,
            message: message.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.warning_type == WarningType::Critical
    }

    /// Returns the same warning with `In '<state>', ` in front of its message.
    pub fn scoped_to_state(self, state_name: &str) -> Self {
        Self {
            warning_type: self.warning_type,
            message: format!("In '{state_name}', {}", self.message),
        }
    }
}

pub fn has_critical_warnings(warnings: &[Warning]) -> bool {
    warnings.iter().any(Warning::is_critical)
}

#[cfg(test)]
#[path = "warnings_test.rs"]
mod tests;
