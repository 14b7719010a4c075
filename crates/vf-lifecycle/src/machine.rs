// machine.rs — Lifecycle operations over the static rule tables.
//
// Everything here is a pure function: the tables are immutable, the inputs
// are call-local, and validation failures come back as values rather than
// errors so API handlers can forward them to the client directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Reachability;
use crate::rules::{lifecycle_graph, main_line, status_metadata_table, transition_rules};
use crate::rules::StatusMetadata;
use crate::status::{ComponentStatus, LifecycleStage};

/// Which constraint check failed, when one did.
///
/// The original contract reported failures only as descriptive strings;
/// the discriminant is carried alongside so callers can branch without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    /// No transition rule exists for the source status.
    RuleNotFound,
    /// The target status is not in the rule's allowed set.
    InvalidTarget,
    /// The trigger event is not in the rule's allowed set.
    InvalidTrigger,
    /// The user role is not in the rule's allowed set.
    InvalidRole,
}

/// Structured outcome of [`validate_transition`].
///
/// The three checks short-circuit in order (target, trigger, role), so at
/// most one error is reported per call even though the contract allows a
/// list. Warnings carry the rule's advisory required conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ValidationFailure>,
}

impl TransitionValidation {
    fn ok(warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings,
            failure: None,
        }
    }

    fn rejected(failure: ValidationFailure, error: String) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            failure: Some(failure),
        }
    }
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_statuses(statuses: &[ComponentStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a proposed transition against the rule table.
///
/// Checks, in order: target status allowed, trigger event allowed, user
/// role allowed. The first failing check determines the reported error,
/// and the error message includes the full allowed set so the caller can
/// self-correct without another round trip.
pub fn validate_transition(
    from: ComponentStatus,
    to: ComponentStatus,
    trigger_event: &str,
    user_role: &str,
) -> TransitionValidation {
    let Some(rule) = transition_rules().get(&from) else {
        debug!(%from, %to, "transition rejected: no rule for source status");
        return TransitionValidation::rejected(
            ValidationFailure::RuleNotFound,
            format!("no lifecycle rules defined for status {from}"),
        );
    };

    if !rule.to.contains(&to) {
        debug!(%from, %to, "transition rejected: target not allowed");
        return TransitionValidation::rejected(
            ValidationFailure::InvalidTarget,
            format!(
                "transition from {from} to {to} is not allowed; valid targets: {}",
                join_statuses(&rule.to)
            ),
        );
    }

    if !rule.trigger_events.iter().any(|e| e == trigger_event) {
        debug!(%from, %to, trigger_event, "transition rejected: trigger not allowed");
        return TransitionValidation::rejected(
            ValidationFailure::InvalidTrigger,
            format!(
                "trigger event '{trigger_event}' is not valid for status {from}; allowed events: {}",
                join(&rule.trigger_events)
            ),
        );
    }

    if !rule.user_roles_allowed.iter().any(|r| r == user_role) {
        debug!(%from, %to, user_role, "transition rejected: role not allowed");
        return TransitionValidation::rejected(
            ValidationFailure::InvalidRole,
            format!(
                "role '{user_role}' is not authorized to transition from {from}; allowed roles: {}",
                join(&rule.user_roles_allowed)
            ),
        );
    }

    let warnings = rule
        .required_conditions
        .iter()
        .map(|condition| format!("required condition not verified: {condition}"))
        .collect();
    TransitionValidation::ok(warnings)
}

/// Allowed targets from a status, in rule order. Empty for `archived` and
/// any status without a rule.
pub fn next_possible_states(current: ComponentStatus) -> Vec<ComponentStatus> {
    lifecycle_graph().next_states(current).to_vec()
}

/// Adjacency-only check — no trigger or role validation. This is the
/// lightweight variant used by path finding.
pub fn is_valid_transition(from: ComponentStatus, to: ComponentStatus) -> bool {
    lifecycle_graph().is_valid_transition(from, to)
}

/// Depth-first search for a transition path, including both endpoints.
/// First path found in rule order, not necessarily the shortest.
pub fn find_transition_path(from: ComponentStatus, to: ComponentStatus) -> Vec<ComponentStatus> {
    lifecycle_graph().find_path(from, to)
}

/// Direct-or-multi-step reachability decision for a proposed target.
pub fn can_transition_to(
    current: ComponentStatus,
    target: ComponentStatus,
) -> Reachability<ComponentStatus> {
    lifecycle_graph().can_transition_to(current, target)
}

/// Approximate progress through the lifecycle, 0–100.
///
/// Position on the canonical main line from draft to archived, as a
/// rounded percentage. Branch-only statuses (quarantine, returned,
/// cancelled, recycling) are off the line and report 0. This is a display
/// heuristic, not a graph-distance computation.
pub fn progress_percentage(status: ComponentStatus) -> u8 {
    let line = main_line();
    match line.iter().position(|s| *s == status) {
        Some(index) => {
            let span = (line.len() - 1) as f64;
            ((index as f64 / span) * 100.0).round() as u8
        }
        None => 0,
    }
}

/// Display metadata for a status. Total: the table covers the whole enum.
pub fn status_metadata(status: ComponentStatus) -> &'static StatusMetadata {
    status_metadata_table()
        .get(&status)
        .expect("metadata table covers every status")
}

/// The human-facing label for a status.
pub fn status_display(status: ComponentStatus) -> &'static str {
    &status_metadata(status).label
}

/// The ordered list of lifecycle stage tags.
pub fn lifecycle_stages() -> &'static [LifecycleStage] {
    &LifecycleStage::ALL
}

/// Stakeholder roles for a status.
pub fn stakeholders_for(status: ComponentStatus) -> &'static [String] {
    &status_metadata(status).stakeholders
}

/// Required follow-up actions for a status.
pub fn required_actions_for(status: ComponentStatus) -> &'static [String] {
    &status_metadata(status).required_actions
}

/// All statuses tagged with a stage, in canonical status order.
pub fn statuses_by_stage(stage: LifecycleStage) -> Vec<ComponentStatus> {
    ComponentStatus::ALL
        .iter()
        .copied()
        .filter(|status| status_metadata(*status).stage == stage)
        .collect()
}

/// Whether the rule out of a status may fire without human action.
pub fn is_automatic(from: ComponentStatus) -> bool {
    transition_rules()
        .get(&from)
        .map(|rule| rule.automatic)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentStatus::*;

    #[test]
    fn engineering_can_approve_a_draft() {
        let result = validate_transition(Draft, Approved, "technical_approval", "engineering");
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn warehouse_cannot_approve_a_draft() {
        let result = validate_transition(Draft, Approved, "technical_approval", "warehouse");
        assert!(!result.valid);
        assert_eq!(result.failure, Some(ValidationFailure::InvalidRole));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("'warehouse' is not authorized"));
        // Allowed roles are spelled out so the caller can self-correct.
        assert!(result.errors[0].contains("engineering"));
    }

    #[test]
    fn invalid_target_lists_allowed_targets() {
        let result = validate_transition(Draft, Operational, "technical_approval", "engineering");
        assert!(!result.valid);
        assert_eq!(result.failure, Some(ValidationFailure::InvalidTarget));
        assert!(result.errors[0].contains("valid targets"));
        assert!(result.errors[0].contains("parsed"));
    }

    #[test]
    fn invalid_trigger_lists_allowed_events() {
        let result = validate_transition(Draft, Approved, "made_up_event", "engineering");
        assert!(!result.valid);
        assert_eq!(result.failure, Some(ValidationFailure::InvalidTrigger));
        assert!(result.errors[0].contains("allowed events"));
    }

    #[test]
    fn checks_short_circuit_in_target_trigger_role_order() {
        // Target, trigger, and role are all wrong; only the target error
        // is reported.
        let result = validate_transition(Draft, Operational, "bogus", "nobody");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.failure, Some(ValidationFailure::InvalidTarget));
    }

    #[test]
    fn archived_has_no_rules() {
        let result = validate_transition(Archived, Draft, "anything", "admin");
        assert!(!result.valid);
        assert_eq!(result.failure, Some(ValidationFailure::RuleNotFound));
        assert!(result.errors[0].contains("no lifecycle rules defined"));
        assert!(next_possible_states(Archived).is_empty());
    }

    #[test]
    fn required_conditions_surface_as_warnings() {
        let result =
            validate_transition(Installed, Commissioned, "commissioning_completed", "commissioning");
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("site_acceptance_test_passed"));
    }

    #[test]
    fn validation_is_repeatable() {
        let first = validate_transition(Draft, Approved, "technical_approval", "engineering");
        let second = validate_transition(Draft, Approved, "technical_approval", "engineering");
        assert_eq!(first, second);
    }

    #[test]
    fn draft_to_archived_path_exists() {
        let path = find_transition_path(Draft, Archived);
        assert!(!path.is_empty());
        assert!(path.len() <= 10 + 1);
        assert_eq!(path.first(), Some(&Draft));
        assert_eq!(path.last(), Some(&Archived));
    }

    #[test]
    fn every_status_reachable_from_draft_is_allowed_by_can_transition_to() {
        // Reachability closure over the documented rule table.
        use std::collections::HashSet;
        let graph = crate::rules::lifecycle_graph();
        let mut reachable = HashSet::new();
        let mut stack = vec![Draft];
        while let Some(status) = stack.pop() {
            for &next in graph.next_states(status) {
                if reachable.insert(next) {
                    stack.push(next);
                }
            }
        }
        assert!(reachable.contains(&Archived));
        for status in reachable {
            assert!(
                can_transition_to(Draft, status).allowed,
                "{status} reachable but not allowed"
            );
        }
    }

    #[test]
    fn archived_cannot_reach_anything() {
        for status in ComponentStatus::ALL {
            if status == Archived {
                continue;
            }
            let decision = can_transition_to(Archived, status);
            assert!(!decision.allowed, "archived must not reach {status}");
        }
    }

    #[test]
    fn multi_step_reachability_reports_path_and_reason() {
        let decision = can_transition_to(Draft, Available);
        assert!(decision.allowed);
        let path = decision.path.expect("multi-step path expected");
        assert_eq!(path.first(), Some(&Draft));
        assert_eq!(path.last(), Some(&Available));
        assert!(decision
            .reason
            .expect("reason expected")
            .contains("intermediate transitions"));
    }

    #[test]
    fn progress_spans_the_main_line() {
        assert_eq!(progress_percentage(Draft), 0);
        assert_eq!(progress_percentage(Archived), 100);
        assert_eq!(progress_percentage(Operational), 80);
        // Branch-only statuses are off the line.
        assert_eq!(progress_percentage(Quarantine), 0);
        assert_eq!(progress_percentage(Cancelled), 0);
    }

    #[test]
    fn progress_is_monotonic_along_the_main_line() {
        let line = crate::rules::main_line();
        let mut last = 0;
        for (i, status) in line.iter().enumerate() {
            let p = progress_percentage(*status);
            if i > 0 {
                assert!(p > last, "{status} did not advance progress");
            }
            last = p;
        }
    }

    #[test]
    fn statuses_by_stage_partitions_the_enum() {
        let mut total = 0;
        for stage in lifecycle_stages() {
            total += statuses_by_stage(*stage).len();
        }
        assert_eq!(total, ComponentStatus::ALL.len());
    }

    #[test]
    fn derived_accessors_are_total() {
        for status in ComponentStatus::ALL {
            assert!(!status_display(status).is_empty());
            let _ = stakeholders_for(status);
            let _ = required_actions_for(status);
        }
    }

    #[test]
    fn automatic_flag_reads_from_rule() {
        assert!(is_automatic(Commissioned));
        assert!(!is_automatic(Draft));
        assert!(!is_automatic(Archived));
    }
}
