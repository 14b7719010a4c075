//! # vf-diff
//!
//! Structural diff/patch engine for nested project documents.
//!
//! Given two snapshots of a document (a project's finance section, an ESG
//! report, a component datasheet), [`compute_json_patch`] produces the
//! minimal list of add/remove/replace operations that distinguishes them.
//! [`group_by_section`] buckets those operations by top-level document key
//! so a reviewer can work through changes one domain area at a time, and
//! [`value_at_path`] recovers the old value for before/after display.
//!
//! The engine is generic over document shape: objects with string keys,
//! with arrays and scalars as leaf values. It never fails on well-formed
//! nested input — malformed values are treated as scalars and produce a
//! `replace`, which is a safe (if occasionally noisy) default.

pub mod diff;
pub mod error;
pub mod group;
pub mod patch;

pub use diff::{apply_patch, compute_json_patch, compute_json_patch_with, value_at_path, Equality};
pub use error::DiffError;
pub use group::group_by_section;
pub use patch::PatchOperation;
