mod catalog;
mod exploration;
mod state;
mod tracked;

pub use catalog::{ExplorationProperties, LanguageCode, StateProperties};
pub use exploration::ExplorationProperty;
pub use state::{StateAccessor, StateProperty};
pub use tracked::{PropertySpec, PropertySpecBuilder, SaveOutcome, TrackedProperty};

use crate::changes::ChangeListError;

#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("property name was never configured")]
    MissingName,
    #[error("property `{0}` was used before it was initialized")]
    NotInitialized(String),
    #[error("`{name}` is not a known {scope} property")]
    UnknownProperty { scope: &'static str, name: String },
    #[error("state `{0}` no longer exists; reinitialize its properties")]
    StateNotFound(String),
    #[error("encode property `{name}` failed: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    ChangeList(#[from] ChangeListError),
}
