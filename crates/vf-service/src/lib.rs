//! # vf-service
//!
//! The boundary contracts of the Voltframe core: typed request/response
//! shapes and pure handler functions that compose the lifecycle machine,
//! the diff engine, the approval workflow, and the audit store.
//!
//! Transport is somebody else's problem — an HTTP layer maps these structs
//! to and from its own wire format. Validation failures come back inside
//! the response (the HTTP layer turns them into a 400), never as `Err`;
//! `Err` is reserved for infrastructure failures like a broken audit store.

pub mod approval_api;
pub mod diff_api;
pub mod transition;

pub use approval_api::{submit_approval_decision, ApprovalDecisionRequest, ApprovalDecisionResponse};
pub use diff_api::{compute_document_diff, DiffRequest, DiffResponse};
pub use transition::{
    next_states, submit_transition, AvailableTransition, NextStatesRequest, NextStatesResponse,
    SubmitTransitionRequest, SubmitTransitionResponse,
};
