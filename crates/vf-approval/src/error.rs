// error.rs — Error types for the approval subsystem.

use thiserror::Error;

use crate::workflow::WorkflowStatus;

/// Errors that can occur while operating on an approval workflow.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// The workflow has already been settled (approved or rejected);
    /// no further decisions are accepted.
    #[error("workflow already settled as {0}")]
    AlreadySettled(WorkflowStatus),

    /// The workflow has no steps to decide on.
    #[error("workflow has no pending step")]
    NoPendingStep,

    /// The decision came from a role other than the current step's.
    #[error("step '{step}' requires role '{expected}', got '{actual}'")]
    WrongRole {
        step: String,
        expected: String,
        actual: String,
    },

    /// A purchase-order status string from external input is not a known
    /// `PoStatus`.
    #[error("unknown purchase order status: {0}")]
    UnknownPoStatus(String),
}
