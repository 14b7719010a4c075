//! # vf-audit
//!
//! Audit trail for accepted lifecycle transitions.
//!
//! Every accepted transition produces one [`TransitionRecord`] — an
//! append-only artifact, immutable once written. The [`TransitionStore`]
//! trait is the repository seam the rest of the system writes through:
//! production deployments back it with their own persistence, tests use
//! [`MemoryStore`], and [`JsonlStore`] provides a simple append-only
//! JSON-lines file that standard tools (jq, grep) can inspect.

pub mod error;
pub mod record;
pub mod store;

pub use error::AuditError;
pub use record::TransitionRecord;
pub use store::{JsonlStore, MemoryStore, TransitionStore};
