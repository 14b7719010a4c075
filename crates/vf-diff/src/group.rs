// group.rs — Section grouping for review presentation.
//
// A reviewer works through changes one domain area at a time (finance,
// esg, layout, ...), so patch operations are bucketed by their top-level
// document key before display.

use std::collections::BTreeMap;

use crate::patch::PatchOperation;

/// Group patch operations by top-level document section.
///
/// The section is the first path segment after the leading slash.
/// Operations keep their input order within each group, and every
/// operation lands in exactly one group. Operations with an empty path
/// have no section and are dropped — intentional filtering, since a
/// whole-document replace has no place in a per-section review.
pub fn group_by_section(operations: &[PatchOperation]) -> BTreeMap<String, Vec<PatchOperation>> {
    let mut groups: BTreeMap<String, Vec<PatchOperation>> = BTreeMap::new();
    for operation in operations {
        if let Some(section) = operation.section() {
            groups
                .entry(section.to_string())
                .or_default()
                .push(operation.clone());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_json_patch;
    use serde_json::json;

    #[test]
    fn groups_by_first_path_segment() {
        let source = json!({"finance": {"capex": 100}, "esg": {"co2_tons": 40}});
        let target = json!({"finance": {"capex": 120}, "esg": {"co2_tons": 38}});
        let patch = compute_json_patch(&source, &target);
        let groups = group_by_section(&patch);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["finance"].len(), 1);
        assert_eq!(groups["finance"][0].path(), "/finance/capex");
        assert_eq!(groups["esg"].len(), 1);
    }

    #[test]
    fn grouping_partitions_the_patch() {
        let source = json!({
            "finance": {"capex": 100, "opex": 10},
            "layout": {"rows": 12},
        });
        let target = json!({
            "finance": {"capex": 120},
            "layout": {"rows": 14, "tilt_deg": 25},
        });
        let patch = compute_json_patch(&source, &target);
        let groups = group_by_section(&patch);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, patch.len());
        // Every operation is in exactly the group its path starts with.
        for (section, operations) in &groups {
            for op in operations {
                assert_eq!(op.section(), Some(section.as_str()));
            }
        }
    }

    #[test]
    fn input_order_preserved_within_group() {
        let patch = vec![
            PatchOperation::Remove {
                path: "/finance/a".to_string(),
            },
            PatchOperation::Remove {
                path: "/finance/b".to_string(),
            },
        ];
        let groups = group_by_section(&patch);
        let paths: Vec<_> = groups["finance"].iter().map(|op| op.path()).collect();
        assert_eq!(paths, vec!["/finance/a", "/finance/b"]);
    }

    #[test]
    fn empty_path_operations_are_dropped() {
        let patch = vec![
            PatchOperation::Replace {
                path: String::new(),
                value: json!(1),
            },
            PatchOperation::Remove {
                path: "/finance/capex".to_string(),
            },
        ];
        let groups = group_by_section(&patch);
        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("finance"));
    }
}
