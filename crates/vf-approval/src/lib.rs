//! # vf-approval
//!
//! Purchase-order lifecycle and multi-step approval chains.
//!
//! Procurement has its own, simpler transition table: a [`PoStatus`]
//! adjacency graph with no role or trigger guards, built on the same
//! [`TransitionGraph`](vf_lifecycle::TransitionGraph) as the component
//! lifecycle. On top of it, an [`ApprovalWorkflow`] models a strictly
//! sequential sign-off chain ("Procurement Manager, then Finance
//! Director"): a rejection settles the workflow immediately, an approval
//! advances to the next step or settles it as approved.

pub mod error;
pub mod po_status;
pub mod workflow;

pub use error::ApprovalError;
pub use po_status::{is_valid_po_transition, next_po_statuses, po_status_graph, PoStatus};
pub use workflow::{
    ApprovalAction, ApprovalStep, ApprovalWorkflow, StepStatus, WorkflowStatus,
};
