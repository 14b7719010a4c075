// diff.rs — Patch computation, path lookup, and patch application.
//
// The diff walks the union of keys at each level, depth-first. Containers
// never produce operations of their own — only the leaves and keys under
// them do — so a patch applied to the source reconstructs the target.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::DiffError;
use crate::patch::PatchOperation;

/// Equality policy for leaf comparison.
///
/// The original review UI used a shallow reference check, which flags
/// structurally-equal-but-not-identical nested values as changed. That is
/// a conservative "always show possibly-changed" behavior, not an obvious
/// bug, so both policies are available and the default is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Equality {
    /// Structural equality: arrays and mismatched containers only count as
    /// changed when their contents differ.
    #[default]
    Deep,
    /// Shallow-style equality: any non-scalar leaf pair counts as changed,
    /// even when structurally equal. Scalars still compare by value.
    Conservative,
}

impl Equality {
    fn changed(self, a: &Value, b: &Value) -> bool {
        match self {
            Equality::Deep => a != b,
            Equality::Conservative => {
                if is_scalar(a) && is_scalar(b) {
                    a != b
                } else {
                    true
                }
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Compute the patch that transforms `source` into `target`, using
/// structural ([`Equality::Deep`]) leaf comparison.
///
/// Key iteration is sorted (serde_json's map is ordered), so output is
/// deterministic across runs.
pub fn compute_json_patch(source: &Value, target: &Value) -> Vec<PatchOperation> {
    compute_json_patch_with(source, target, Equality::Deep)
}

/// Compute the patch with an explicit leaf-equality policy.
pub fn compute_json_patch_with(
    source: &Value,
    target: &Value,
    equality: Equality,
) -> Vec<PatchOperation> {
    let mut operations = Vec::new();
    diff_value(source, target, "", equality, &mut operations);
    operations
}

fn diff_value(
    source: &Value,
    target: &Value,
    path: &str,
    equality: Equality,
    operations: &mut Vec<PatchOperation>,
) {
    match (source, target) {
        // Only object/object pairs recurse. Arrays, scalars, and type
        // mismatches are leaves.
        (Value::Object(src), Value::Object(tgt)) => {
            let keys: BTreeSet<&String> = src.keys().chain(tgt.keys()).collect();
            for key in keys {
                let child_path = format!("{path}/{key}");
                match (src.get(key.as_str()), tgt.get(key.as_str())) {
                    (None, Some(added)) => operations.push(PatchOperation::Add {
                        path: child_path,
                        value: added.clone(),
                    }),
                    (Some(_), None) => operations.push(PatchOperation::Remove { path: child_path }),
                    (Some(s), Some(t)) => diff_value(s, t, &child_path, equality, operations),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if equality.changed(source, target) {
                operations.push(PatchOperation::Replace {
                    path: path.to_string(),
                    value: target.clone(),
                });
            }
        }
    }
}

/// Walk a document along a `/`-joined path.
///
/// Returns `None` the moment any intermediate key is missing or resolves
/// to a non-object — the caller treats that as "no prior value". Used to
/// recover the old value for before/after display, since patch operations
/// only carry the new one.
pub fn value_at_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Some(document);
    }
    let mut current = document;
    for segment in trimmed.split('/') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Apply a patch to a document in place.
///
/// Operations produced by [`compute_json_patch`] always resolve against
/// the source they were computed from; applying them elsewhere can fail
/// with [`DiffError::PathNotFound`] or [`DiffError::NotAnObject`].
pub fn apply_patch(document: &mut Value, operations: &[PatchOperation]) -> Result<(), DiffError> {
    for operation in operations {
        apply_one(document, operation)?;
    }
    Ok(())
}

fn apply_one(document: &mut Value, operation: &PatchOperation) -> Result<(), DiffError> {
    let path = operation.path();
    let trimmed = path.strip_prefix('/').unwrap_or(path);

    // A whole-document operation (empty path) replaces the root.
    if trimmed.is_empty() {
        return match operation {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                *document = value.clone();
                Ok(())
            }
            PatchOperation::Remove { .. } => Err(DiffError::PathNotFound(path.to_string())),
        };
    }

    let (parent_path, key) = match trimmed.rsplit_once('/') {
        Some((parent, key)) => (parent, key),
        None => ("", trimmed),
    };

    let mut parent = document;
    if !parent_path.is_empty() {
        for segment in parent_path.split('/') {
            parent = match parent {
                Value::Object(map) => map
                    .get_mut(segment)
                    .ok_or_else(|| DiffError::PathNotFound(path.to_string()))?,
                _ => return Err(DiffError::NotAnObject(path.to_string())),
            };
        }
    }
    let Value::Object(map) = parent else {
        return Err(DiffError::NotAnObject(path.to_string()));
    };

    match operation {
        PatchOperation::Add { value, .. } => {
            map.insert(key.to_string(), value.clone());
        }
        PatchOperation::Replace { value, .. } => {
            if !map.contains_key(key) {
                return Err(DiffError::PathNotFound(path.to_string()));
            }
            map.insert(key.to_string(), value.clone());
        }
        PatchOperation::Remove { .. } => {
            map.remove(key)
                .ok_or_else(|| DiffError::PathNotFound(path.to_string()))?;
        }
    }
    Ok(())
}
