use super::{BackendError, ExplorationBackend};
use crate::changes::{apply_change_list, ChangeRecord};
use crate::states::NewStateTemplate;
use expl_core::ExplorationDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub version: u64,
    pub commit_message: String,
    pub change_count: usize,
}

/// Backend that keeps the stored exploration in memory.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    document: ExplorationDocument,
    template: NewStateTemplate,
    commits: Vec<CommitRecord>,
}

impl InMemoryBackend {
    pub fn new(document: ExplorationDocument, template: NewStateTemplate) -> Self {
        Self {
            document,
            template,
            commits: Vec::new(),
        }
    }

    pub fn document(&self) -> &ExplorationDocument {
        &self.document
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }
}

impl ExplorationBackend for InMemoryBackend {
    fn load(&mut self) -> Result<ExplorationDocument, BackendError> {
        Ok(self.document.clone())
    }

    fn save(
        &mut self,
        change_list: &[ChangeRecord],
        commit_message: &str,
        version: u64,
    ) -> Result<ExplorationDocument, BackendError> {
        if self.document.version != version {
            return Err(BackendError::VersionMismatch {
                submitted: version,
                stored: self.document.version,
            });
        }
        let mut updated = apply_change_list(&self.document, change_list, &self.template)?;
        updated.version += 1;
        self.commits.push(CommitRecord {
            version: updated.version,
            commit_message: commit_message.to_string(),
            change_count: change_list.len(),
        });
        self.document = updated.clone();
        Ok(updated)
    }
}
