use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A draft arrived without a field the store requires.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Toggle or delete addressed an id that is not in the store.
    #[error("no reminder with id {0}")]
    NotFound(i64),

    /// The durable snapshot could not be written. The in-memory change
    /// survives; callers warn instead of rolling back.
    #[error("failed to write {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode reminders: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// True for the save-side storage failures that leave a live but
    /// unpersisted mutation behind.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Save { .. } | StoreError::Encode(_))
    }
}
