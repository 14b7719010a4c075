// diff_api.rs — Document diff contract.
//
// Computes the patch between two document snapshots and the per-section
// grouping the review UI renders from. Pure, never fails on well-formed
// nested input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vf_diff::{compute_json_patch, group_by_section, PatchOperation};

/// Two snapshots of the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRequest {
    pub source_document: Value,
    pub target_document: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResponse {
    pub patch: Vec<PatchOperation>,
    pub grouped_by_section: BTreeMap<String, Vec<PatchOperation>>,
}

/// Compute the patch and its section grouping for review.
pub fn compute_document_diff(request: DiffRequest) -> DiffResponse {
    let patch = compute_json_patch(&request.source_document, &request.target_document);
    let grouped_by_section = group_by_section(&patch);
    DiffResponse {
        patch,
        grouped_by_section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn diff_response_carries_patch_and_grouping() {
        let response = compute_document_diff(DiffRequest {
            source_document: json!({"finance": {"capex": 100}, "esg": {"co2_tons": 40}}),
            target_document: json!({"finance": {"capex": 120}, "esg": {"co2_tons": 40}}),
        });

        assert_eq!(response.patch.len(), 1);
        assert_eq!(response.patch[0].path(), "/finance/capex");
        assert_eq!(response.grouped_by_section.len(), 1);
        assert!(response.grouped_by_section.contains_key("finance"));
    }

    #[test]
    fn identical_documents_yield_empty_response() {
        let doc = json!({"finance": {"capex": 100}});
        let response = compute_document_diff(DiffRequest {
            source_document: doc.clone(),
            target_document: doc,
        });
        assert!(response.patch.is_empty());
        assert!(response.grouped_by_section.is_empty());
    }
}
