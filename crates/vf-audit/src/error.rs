// error.rs — Error types for the audit subsystem.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting or reading audit records.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The store file could not be opened or created.
    #[error("failed to open audit store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A read or write on the store failed.
    #[error("audit store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized or deserialized.
    #[error("audit record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
