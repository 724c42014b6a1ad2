use std::path::PathBuf;

use thiserror::Error;

use crate::models::InvalidFields;

/// Failures surfaced by [`Store`](super::Store) operations.
///
/// None of them leave the in-memory sequence partially modified.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("invalid input: {0}")]
    Validation(#[from] InvalidFields),
    #[error("no expense at position {position} ({len} recorded)")]
    Index { position: usize, len: usize },
    #[error("{} does not contain a valid expense list", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
