use super::{BackendError, ExplorationBackend};
use crate::changes::{apply_change_list, ChangeRecord};
use crate::states::NewStateTemplate;
use expl_core::ExplorationDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Keeps one exploration as a JSON file and replays saved change lists onto it.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    template: NewStateTemplate,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>, template: NewStateTemplate) -> Self {
        Self {
            path: path.into(),
            template,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_document(&self, document: &ExplorationDocument) -> Result<(), BackendError> {
        let mut encoded = serde_json::to_string_pretty(document).map_err(|source| BackendError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        encoded.push('\n');
        fs::write(&self.path, encoded).map_err(|source| BackendError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl ExplorationBackend for FileBackend {
    fn load(&mut self) -> Result<ExplorationDocument, BackendError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| BackendError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BackendError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(
        &mut self,
        change_list: &[ChangeRecord],
        commit_message: &str,
        version: u64,
    ) -> Result<ExplorationDocument, BackendError> {
        let stored = self.load()?;
        if stored.version != version {
            return Err(BackendError::VersionMismatch {
                submitted: version,
                stored: stored.version,
            });
        }

        let mut updated = apply_change_list(&stored, change_list, &self.template)?;
        updated.version = stored.version + 1;
        self.write_document(&updated)?;
        info!(
            path = %self.path.display(),
            version = updated.version,
            changes = change_list.len(),
            commit_message,
            "exploration saved"
        );
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
