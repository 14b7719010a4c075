// error.rs — Error types for the diff engine.
//
// Diff computation itself never fails; errors only arise when applying a
// patch to a document that does not contain the paths it names.

use thiserror::Error;

/// Errors that can occur while applying a patch.
#[derive(Debug, Error)]
pub enum DiffError {
    /// An operation names a path whose parent does not exist in the
    /// document being patched.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// An operation's parent path resolves to a non-object value.
    #[error("cannot apply operation at {0}: parent is not an object")]
    NotAnObject(String),
}
