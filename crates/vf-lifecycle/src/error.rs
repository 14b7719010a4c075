// error.rs — Error types for the lifecycle subsystem.
//
// Validation failures are NOT errors here — they come back as structured
// `TransitionValidation` values so API handlers can map them straight to a
// client response. Errors are reserved for out-of-contract input, which for
// this crate means status strings from the outside world that are not part
// of the closed enum.

use thiserror::Error;

/// Errors that can occur at the lifecycle deserialization boundary.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A status string from external input is not a known `ComponentStatus`.
    #[error("unknown component status: {0}")]
    UnknownStatus(String),

    /// A stage string from external input is not a known `LifecycleStage`.
    #[error("unknown lifecycle stage: {0}")]
    UnknownStage(String),
}
