//! # vf-lifecycle
//!
//! The component lifecycle state machine for Voltframe.
//!
//! A tracked physical asset (an inverter, a transformer, a PV module) moves
//! through a fixed status graph from `draft` to `archived`. This crate owns
//! that graph: which transitions are allowed, which trigger events and user
//! roles may request them, and how to find a multi-step path when a direct
//! transition does not exist.
//!
//! ## Key components
//!
//! - [`ComponentStatus`] — the closed set of lifecycle statuses
//! - [`TransitionGraph`] — a generic labeled transition graph, also used by
//!   the purchase-order workflow in `vf-approval`
//! - [`validate_transition`] — the full target/trigger/role check, returning
//!   a structured [`TransitionValidation`] (never an error)
//! - [`can_transition_to`] — direct check plus DFS path finding
//! - [`StatusMetadata`] — per-status display data, stage tags, stakeholders
//!
//! The rule and metadata tables are static configuration: built once at
//! first use and never mutated, so every operation here is a pure function
//! safe to call concurrently.

pub mod error;
pub mod graph;
pub mod machine;
pub mod rules;
pub mod status;

pub use error::LifecycleError;
pub use graph::{Reachability, TransitionGraph, MAX_SEARCH_DEPTH};
pub use machine::{
    can_transition_to, find_transition_path, is_automatic, is_valid_transition,
    lifecycle_stages, next_possible_states, progress_percentage, required_actions_for,
    stakeholders_for, status_display, status_metadata, statuses_by_stage, validate_transition,
    TransitionValidation, ValidationFailure,
};
pub use rules::{lifecycle_graph, transition_rules, StatusMetadata, TransitionRule};
pub use status::{ComponentStatus, LifecycleStage};
