// rules.rs — Static lifecycle configuration: transition rules, status
// metadata, and the canonical progress line.
//
// These tables are the single source of truth for the component lifecycle.
// They are built once on first access (OnceLock) and never mutated, which
// is what makes every operation in machine.rs a pure function.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::graph::TransitionGraph;
use crate::status::{ComponentStatus, LifecycleStage};

use ComponentStatus::*;

/// The outbound rule for one source status.
///
/// `required_conditions` are advisory: the state machine surfaces them as
/// warnings but does not enforce them (enforcement lives with the caller,
/// who can actually check documents, inspections, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Allowed target statuses, in rule order. First-listed is tried first
    /// by path finding but is not otherwise privileged.
    pub to: Vec<ComponentStatus>,
    /// Business events that may accompany a transition out of this status.
    pub trigger_events: Vec<String>,
    /// Roles authorized to request a transition out of this status.
    pub user_roles_allowed: Vec<String>,
    /// Advisory preconditions, surfaced as warnings on valid transitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_conditions: Vec<String>,
    /// Whether the transition may fire without human action.
    #[serde(default)]
    pub automatic: bool,
}

/// Per-status display record. Does not affect transition validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMetadata {
    pub label: String,
    pub description: String,
    pub stage: LifecycleStage,
    pub required_actions: Vec<String>,
    pub stakeholders: Vec<String>,
}

fn rule(
    to: &[ComponentStatus],
    trigger_events: &[&str],
    user_roles_allowed: &[&str],
    required_conditions: &[&str],
    automatic: bool,
) -> TransitionRule {
    TransitionRule {
        to: to.to_vec(),
        trigger_events: trigger_events.iter().map(|s| s.to_string()).collect(),
        user_roles_allowed: user_roles_allowed.iter().map(|s| s.to_string()).collect(),
        required_conditions: required_conditions.iter().map(|s| s.to_string()).collect(),
        automatic,
    }
}

fn meta(
    label: &str,
    description: &str,
    stage: LifecycleStage,
    required_actions: &[&str],
    stakeholders: &[&str],
) -> StatusMetadata {
    StatusMetadata {
        label: label.to_string(),
        description: description.to_string(),
        stage,
        required_actions: required_actions.iter().map(|s| s.to_string()).collect(),
        stakeholders: stakeholders.iter().map(|s| s.to_string()).collect(),
    }
}

/// The transition rule table. Every status except `archived` has exactly
/// one outbound rule.
pub fn transition_rules() -> &'static HashMap<ComponentStatus, TransitionRule> {
    static RULES: OnceLock<HashMap<ComponentStatus, TransitionRule>> = OnceLock::new();
    RULES.get_or_init(build_rules)
}

fn build_rules() -> HashMap<ComponentStatus, TransitionRule> {
    let mut rules = HashMap::new();

    rules.insert(
        Draft,
        rule(
            &[Parsed, Approved, Cancelled],
            &["datasheet_parsed", "technical_approval", "request_cancelled"],
            &["engineering", "design", "data_steward", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Parsed,
        rule(
            &[Enriched, Quarantine],
            &["enrichment_completed", "parse_quarantined"],
            &["data_steward", "engineering", "admin"],
            &[],
            true,
        ),
    );
    rules.insert(
        Enriched,
        rule(
            &[DedupePending],
            &["dedupe_started"],
            &["data_steward", "admin"],
            &[],
            true,
        ),
    );
    rules.insert(
        DedupePending,
        rule(
            &[CompliancePending, Quarantine],
            &["dedupe_cleared", "duplicate_found"],
            &["data_steward", "admin"],
            &[],
            true,
        ),
    );
    rules.insert(
        CompliancePending,
        rule(
            &[Approved, Quarantine],
            &["compliance_passed", "compliance_failed"],
            &["compliance", "admin"],
            &["certification_documents_on_file"],
            false,
        ),
    );
    rules.insert(
        Approved,
        rule(
            &[Available, Archived],
            &["catalog_published", "archive_requested"],
            &["engineering", "catalog_manager", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Available,
        rule(
            &[Sourcing, Archived],
            &["sourcing_started", "archive_requested"],
            &["procurement", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Sourcing,
        rule(
            &[RfqOpen, Cancelled],
            &["rfq_issued", "sourcing_cancelled"],
            &["procurement", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        RfqOpen,
        rule(
            &[RfqAwarded, Cancelled],
            &["bid_selected", "rfq_cancelled"],
            &["procurement", "procurement_manager", "admin"],
            &["at_least_one_valid_bid"],
            false,
        ),
    );
    rules.insert(
        RfqAwarded,
        rule(
            &[Purchasing],
            &["purchase_requisition_raised"],
            &["procurement", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Purchasing,
        rule(
            &[Ordered, Cancelled],
            &["po_issued", "po_cancelled"],
            &["procurement", "finance", "admin"],
            &["purchase_order_approved"],
            false,
        ),
    );
    rules.insert(
        Ordered,
        rule(
            &[Shipped, Cancelled],
            &["shipment_confirmed", "order_cancelled"],
            &["supplier", "procurement", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Shipped,
        rule(
            &[Received, Returned],
            &["goods_received", "shipment_rejected"],
            &["warehouse", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Received,
        rule(
            &[Installed, Returned, Quarantine],
            &["installation_completed", "inspection_failed", "defect_reported"],
            &["warehouse", "field_engineer", "admin"],
            &["incoming_inspection_passed"],
            false,
        ),
    );
    rules.insert(
        Installed,
        rule(
            &[Commissioned],
            &["commissioning_completed"],
            &["field_engineer", "commissioning", "admin"],
            &["site_acceptance_test_passed"],
            false,
        ),
    );
    rules.insert(
        Commissioned,
        rule(
            &[Operational],
            &["handover_completed"],
            &["commissioning", "operations", "admin"],
            &[],
            true,
        ),
    );
    rules.insert(
        Operational,
        rule(
            &[WarrantyActive, Maintenance, Retired],
            &["warranty_registered", "maintenance_scheduled", "retirement_approved"],
            &["operations", "maintenance_crew", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        WarrantyActive,
        rule(
            &[Operational, Maintenance, Retired],
            &["warranty_expired", "warranty_claim_opened", "retirement_approved"],
            &["operations", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Maintenance,
        rule(
            &[Operational, Retired],
            &["maintenance_completed", "retirement_approved"],
            &["maintenance_crew", "operations", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Retired,
        rule(
            &[Recycling, Archived],
            &["recycling_started", "archive_requested"],
            &["operations", "sustainability", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Recycling,
        rule(
            &[Archived],
            &["recycling_completed"],
            &["sustainability", "admin"],
            &[],
            true,
        ),
    );
    rules.insert(
        Quarantine,
        rule(
            &[CompliancePending, Returned, Retired],
            &["quarantine_cleared", "return_authorized", "disposal_approved"],
            &["quality", "data_steward", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Returned,
        rule(
            &[Ordered, Cancelled],
            &["replacement_ordered", "return_closed"],
            &["warehouse", "procurement", "admin"],
            &[],
            false,
        ),
    );
    rules.insert(
        Cancelled,
        rule(
            &[Archived],
            &["archive_requested"],
            &["admin"],
            &[],
            true,
        ),
    );
    // Archived is terminal: no rule.

    rules
}

/// The lifecycle graph derived from the rule table: adjacency only, used
/// for `is_valid_transition` and path finding.
pub fn lifecycle_graph() -> &'static TransitionGraph<ComponentStatus> {
    static GRAPH: OnceLock<TransitionGraph<ComponentStatus>> = OnceLock::new();
    GRAPH.get_or_init(|| {
        let mut graph = TransitionGraph::new();
        for (from, rule) in transition_rules() {
            graph.set_edges(*from, rule.to.iter().copied());
        }
        graph
    })
}

/// The canonical "main line" from draft to archived used for the progress
/// heuristic. Branch-only statuses (quarantine, returned, cancelled,
/// recycling) are deliberately off the line.
pub fn main_line() -> &'static [ComponentStatus] {
    &[
        Draft,
        Parsed,
        Enriched,
        DedupePending,
        CompliancePending,
        Approved,
        Available,
        Sourcing,
        RfqOpen,
        RfqAwarded,
        Purchasing,
        Ordered,
        Shipped,
        Received,
        Installed,
        Commissioned,
        Operational,
        WarrantyActive,
        Maintenance,
        Retired,
        Archived,
    ]
}

/// The status metadata table. Complete over the enum.
pub fn status_metadata_table() -> &'static HashMap<ComponentStatus, StatusMetadata> {
    static META: OnceLock<HashMap<ComponentStatus, StatusMetadata>> = OnceLock::new();
    META.get_or_init(build_metadata)
}

fn build_metadata() -> HashMap<ComponentStatus, StatusMetadata> {
    use LifecycleStage::*;

    let mut table = HashMap::new();
    table.insert(
        Draft,
        meta(
            "Draft",
            "Component entered manually or from an uploaded datasheet, not yet processed.",
            Design,
            &["upload datasheet", "complete base attributes"],
            &["engineering", "design"],
        ),
    );
    table.insert(
        Parsed,
        meta(
            "Parsed",
            "Datasheet parsed into structured attributes.",
            Design,
            &["review parsed attributes"],
            &["data_steward", "engineering"],
        ),
    );
    table.insert(
        Enriched,
        meta(
            "Enriched",
            "Attributes enriched from reference catalogs and supplier data.",
            Design,
            &["spot-check enriched fields"],
            &["data_steward"],
        ),
    );
    table.insert(
        DedupePending,
        meta(
            "Dedupe pending",
            "Awaiting duplicate detection against the existing catalog.",
            Design,
            &["resolve duplicate candidates"],
            &["data_steward"],
        ),
    );
    table.insert(
        CompliancePending,
        meta(
            "Compliance pending",
            "Awaiting compliance and certification review.",
            Design,
            &["verify certificates", "record compliance decision"],
            &["compliance"],
        ),
    );
    table.insert(
        Approved,
        meta(
            "Approved",
            "Technically and commercially approved for use in designs.",
            Catalog,
            &["publish to catalog"],
            &["engineering", "catalog_manager"],
        ),
    );
    table.insert(
        Available,
        meta(
            "Available",
            "Published to the design catalog and selectable in projects.",
            Catalog,
            &[],
            &["catalog_manager", "procurement"],
        ),
    );
    table.insert(
        Sourcing,
        meta(
            "Sourcing",
            "Supplier sourcing in progress.",
            Procurement,
            &["shortlist suppliers"],
            &["procurement"],
        ),
    );
    table.insert(
        RfqOpen,
        meta(
            "RFQ open",
            "Request for quotation open to suppliers.",
            Procurement,
            &["collect bids", "evaluate bids"],
            &["procurement", "procurement_manager"],
        ),
    );
    table.insert(
        RfqAwarded,
        meta(
            "RFQ awarded",
            "A supplier bid has been selected.",
            Procurement,
            &["raise purchase requisition"],
            &["procurement"],
        ),
    );
    table.insert(
        Purchasing,
        meta(
            "Purchasing",
            "Purchase requisition raised, purchase order in preparation.",
            Procurement,
            &["obtain purchase order approval"],
            &["procurement", "finance"],
        ),
    );
    table.insert(
        Ordered,
        meta(
            "Ordered",
            "Purchase order issued to the supplier.",
            Procurement,
            &["track order confirmation"],
            &["procurement", "supplier"],
        ),
    );
    table.insert(
        Shipped,
        meta(
            "Shipped",
            "In transit from the supplier.",
            Logistics,
            &["track shipment"],
            &["warehouse", "procurement"],
        ),
    );
    table.insert(
        Received,
        meta(
            "Received",
            "Received at the warehouse or site.",
            Logistics,
            &["perform incoming inspection"],
            &["warehouse", "field_engineer"],
        ),
    );
    table.insert(
        Installed,
        meta(
            "Installed",
            "Physically installed at the site.",
            Deployment,
            &["schedule commissioning"],
            &["field_engineer", "commissioning"],
        ),
    );
    table.insert(
        Commissioned,
        meta(
            "Commissioned",
            "Commissioning tests completed, awaiting handover.",
            Deployment,
            &["complete handover documentation"],
            &["commissioning", "operations"],
        ),
    );
    table.insert(
        Operational,
        meta(
            "Operational",
            "In productive operation.",
            Operations,
            &[],
            &["operations"],
        ),
    );
    table.insert(
        WarrantyActive,
        meta(
            "Warranty active",
            "Operating under an active warranty registration or claim.",
            Operations,
            &["track warranty claim"],
            &["operations"],
        ),
    );
    table.insert(
        Maintenance,
        meta(
            "Maintenance",
            "Withdrawn from operation for maintenance.",
            Operations,
            &["complete maintenance work order"],
            &["maintenance_crew", "operations"],
        ),
    );
    table.insert(
        Retired,
        meta(
            "Retired",
            "Permanently withdrawn from operation.",
            EndOfLife,
            &["decide disposal route"],
            &["operations", "sustainability"],
        ),
    );
    table.insert(
        Recycling,
        meta(
            "Recycling",
            "In the recycling or disposal process.",
            EndOfLife,
            &["record disposal certificate"],
            &["sustainability"],
        ),
    );
    table.insert(
        Quarantine,
        meta(
            "Quarantine",
            "Held back due to a data-quality or inspection problem.",
            Exception,
            &["investigate quarantine cause"],
            &["quality", "data_steward"],
        ),
    );
    table.insert(
        Returned,
        meta(
            "Returned",
            "Returned to the supplier.",
            Exception,
            &["process supplier return"],
            &["warehouse", "procurement"],
        ),
    );
    table.insert(
        Cancelled,
        meta(
            "Cancelled",
            "Cancelled before reaching operation.",
            Exception,
            &[],
            &["admin"],
        ),
    );
    table.insert(
        Archived,
        meta(
            "Archived",
            "Record closed. No further transitions.",
            EndOfLife,
            &[],
            &["admin"],
        ),
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_except_archived_has_a_rule() {
        let rules = transition_rules();
        for status in ComponentStatus::ALL {
            if status.is_terminal() {
                assert!(rules.get(&status).is_none(), "{status} must have no rule");
            } else {
                assert!(rules.get(&status).is_some(), "{status} is missing a rule");
            }
        }
    }

    #[test]
    fn rule_targets_are_distinct() {
        for (from, rule) in transition_rules() {
            let mut seen = std::collections::HashSet::new();
            for to in &rule.to {
                assert!(seen.insert(to), "duplicate target {to} in rule for {from}");
            }
        }
    }

    #[test]
    fn rules_carry_at_least_one_event_and_role() {
        for (from, rule) in transition_rules() {
            assert!(!rule.to.is_empty(), "empty target list for {from}");
            assert!(!rule.trigger_events.is_empty(), "no events for {from}");
            assert!(!rule.user_roles_allowed.is_empty(), "no roles for {from}");
        }
    }

    #[test]
    fn metadata_table_is_complete() {
        let table = status_metadata_table();
        for status in ComponentStatus::ALL {
            assert!(table.get(&status).is_some(), "{status} missing metadata");
        }
        assert_eq!(table.len(), ComponentStatus::ALL.len());
    }

    #[test]
    fn main_line_excludes_branch_only_statuses() {
        let line = main_line();
        for excluded in [Quarantine, Returned, Cancelled, Recycling] {
            assert!(!line.contains(&excluded));
        }
        assert_eq!(line.first(), Some(&Draft));
        assert_eq!(line.last(), Some(&Archived));
    }

    #[test]
    fn graph_matches_rule_table() {
        let graph = lifecycle_graph();
        for (from, rule) in transition_rules() {
            assert_eq!(graph.next_states(*from), rule.to.as_slice());
        }
        assert!(graph.next_states(Archived).is_empty());
    }
}
