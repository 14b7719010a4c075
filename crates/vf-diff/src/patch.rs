// patch.rs — Patch operation data model.
//
// One PatchOperation describes a single-path difference between two
// document snapshots. Modeling it as a tagged union (rather than a struct
// with an optional value) encodes the invariant that `remove` never
// carries a value while `add` and `replace` always do.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One atomic add/remove/replace instruction.
///
/// Paths are `/`-joined key segments (JSON-Pointer-like), e.g.
/// `/finance/capex`. Keys are not escaped — acceptable for the closed set
/// of document schemas in use, where keys never contain `/` or `~`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    /// The key exists only in the target document.
    Add { path: String, value: Value },
    /// The key exists only in the source document.
    Remove { path: String },
    /// The key exists in both documents with different values.
    Replace { path: String, value: Value },
}

impl PatchOperation {
    /// The document path this operation applies to.
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. } => path,
        }
    }

    /// The new value carried by this operation, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                Some(value)
            }
            PatchOperation::Remove { .. } => None,
        }
    }

    /// The top-level document section this operation belongs to: the first
    /// path segment after the leading slash. `None` for operations with an
    /// empty path.
    pub fn section(&self) -> Option<&str> {
        self.path().split('/').nth(1).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operations_serialize_with_op_tag() {
        let op = PatchOperation::Replace {
            path: "/finance/capex".to_string(),
            value: json!(120),
        };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"replace","path":"/finance/capex","value":120}"#);
    }

    #[test]
    fn remove_carries_no_value() {
        let op = PatchOperation::Remove {
            path: "/esg/old_metric".to_string(),
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(!json.contains("value"));
        assert!(op.value().is_none());
    }

    #[test]
    fn serialization_round_trip() {
        let op = PatchOperation::Add {
            path: "/finance/opex".to_string(),
            value: json!({"annual": 12.5}),
        };
        let json = serde_json::to_string(&op).unwrap();
        let restored: PatchOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, restored);
    }

    #[test]
    fn section_is_first_path_segment() {
        let op = PatchOperation::Remove {
            path: "/finance/capex/breakdown".to_string(),
        };
        assert_eq!(op.section(), Some("finance"));
    }

    #[test]
    fn empty_path_has_no_section() {
        let op = PatchOperation::Remove {
            path: String::new(),
        };
        assert_eq!(op.section(), None);
        let op = PatchOperation::Remove {
            path: "/".to_string(),
        };
        assert_eq!(op.section(), None);
    }
}
