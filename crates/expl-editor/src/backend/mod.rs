mod file;
mod memory;

pub use file::FileBackend;
pub use memory::{CommitRecord, InMemoryBackend};

use crate::changes::{ChangeRecord, ReplayError};
use expl_core::ExplorationDocument;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("access `{path}` failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("decode `{path}` failed: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("version mismatch: saving against version {submitted} but the stored exploration is at version {stored}")]
    VersionMismatch { submitted: u64, stored: u64 },
    #[error("change list rejected: {0}")]
    Rejected(#[from] ReplayError),
}

/// Where exploration documents are loaded from and saved to. A save hands
/// over the provisional change list and returns the stored document.
pub trait ExplorationBackend {
    fn load(&mut self) -> Result<ExplorationDocument, BackendError>;

    fn save(
        &mut self,
        change_list: &[ChangeRecord],
        commit_message: &str,
        version: u64,
    ) -> Result<ExplorationDocument, BackendError>;
}
