// transition.rs — Submit-transition and query-next-states contracts.
//
// submit_transition is the write path: validate against the rule table,
// append an audit record on acceptance, and always return the set of next
// possible states so the caller can self-correct without a second round
// trip.

use serde::{Deserialize, Serialize};
use tracing::info;

use vf_audit::{AuditError, TransitionRecord, TransitionStore};
use vf_lifecycle::{
    next_possible_states, transition_rules, validate_transition, ComponentStatus,
};

/// A request to move a component to a new status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransitionRequest {
    pub component_id: String,
    pub from_status: ComponentStatus,
    pub to_status: ComponentStatus,
    pub trigger_event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_data: Option<serde_json::Value>,
    pub user_id: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outcome of a transition submission.
///
/// On rejection, `errors` describes the first failing constraint and
/// `next_possible_states` still lists the valid targets from the current
/// status (the HTTP-equivalent status is "bad request").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransitionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_record: Option<TransitionRecord>,
    pub next_possible_states: Vec<ComponentStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Validate and record a lifecycle transition.
///
/// `Err` only signals a store failure; a rejected transition is a
/// successful call with `success: false`.
pub fn submit_transition(
    request: SubmitTransitionRequest,
    store: &mut dyn TransitionStore,
) -> Result<SubmitTransitionResponse, AuditError> {
    let validation = validate_transition(
        request.from_status,
        request.to_status,
        &request.trigger_event,
        &request.role,
    );

    if !validation.valid {
        return Ok(SubmitTransitionResponse {
            success: false,
            transition_record: None,
            next_possible_states: next_possible_states(request.from_status),
            errors: validation.errors,
            warnings: validation.warnings,
        });
    }

    let mut record = TransitionRecord::new(
        &request.component_id,
        request.from_status,
        request.to_status,
        &request.trigger_event,
        &request.user_id,
    );
    if let Some(data) = request.trigger_data {
        record = record.with_trigger_data(data);
    }
    if let Some(notes) = request.notes {
        record = record.with_notes(notes);
    }
    store.append(record.clone())?;
    info!(
        component_id = %request.component_id,
        from = %request.from_status,
        to = %request.to_status,
        trigger_event = %request.trigger_event,
        "transition accepted"
    );

    Ok(SubmitTransitionResponse {
        success: true,
        transition_record: Some(record),
        next_possible_states: next_possible_states(request.to_status),
        errors: Vec::new(),
        warnings: validation.warnings,
    })
}

/// A query for the transitions available from a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextStatesRequest {
    pub component_id: String,
    pub current_status: ComponentStatus,
}

/// One available transition option: a trigger event with the targets,
/// roles, and advisory conditions of the rule it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableTransition {
    pub trigger_event: String,
    pub allowed_target_states: Vec<ComponentStatus>,
    pub roles_allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_conditions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextStatesResponse {
    pub next_possible_states: Vec<ComponentStatus>,
    pub available_transitions: Vec<AvailableTransition>,
}

/// List the valid targets and transition options from a status. Empty for
/// terminal statuses.
pub fn next_states(request: NextStatesRequest) -> NextStatesResponse {
    let available_transitions = transition_rules()
        .get(&request.current_status)
        .map(|rule| {
            rule.trigger_events
                .iter()
                .map(|event| AvailableTransition {
                    trigger_event: event.clone(),
                    allowed_target_states: rule.to.clone(),
                    roles_allowed: rule.user_roles_allowed.clone(),
                    required_conditions: rule.required_conditions.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    NextStatesResponse {
        next_possible_states: next_possible_states(request.current_status),
        available_transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_audit::MemoryStore;
    use ComponentStatus::*;

    fn request(to: ComponentStatus, role: &str) -> SubmitTransitionRequest {
        SubmitTransitionRequest {
            component_id: "CMP-042".to_string(),
            from_status: Draft,
            to_status: to,
            trigger_event: "technical_approval".to_string(),
            trigger_data: None,
            user_id: "u-7".to_string(),
            role: role.to_string(),
            notes: None,
        }
    }

    #[test]
    fn accepted_transition_appends_record() {
        let mut store = MemoryStore::new();
        let response = submit_transition(request(Approved, "engineering"), &mut store).unwrap();

        assert!(response.success);
        let record = response.transition_record.expect("record expected");
        assert_eq!(record.from, Draft);
        assert_eq!(record.to, Approved);
        assert_eq!(store.len().unwrap(), 1);
        // Next states are computed from the NEW status.
        assert_eq!(response.next_possible_states, vec![Available, Archived]);
    }

    #[test]
    fn rejected_transition_reports_errors_and_keeps_store_untouched() {
        let mut store = MemoryStore::new();
        let response = submit_transition(request(Approved, "warehouse"), &mut store).unwrap();

        assert!(!response.success);
        assert!(response.transition_record.is_none());
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].contains("not authorized"));
        assert_eq!(store.len().unwrap(), 0);
        // Valid targets from the CURRENT status, so the caller can retry.
        assert_eq!(
            response.next_possible_states,
            vec![Parsed, Approved, Cancelled]
        );
    }

    #[test]
    fn next_states_lists_one_option_per_trigger_event() {
        let response = next_states(NextStatesRequest {
            component_id: "CMP-042".to_string(),
            current_status: Draft,
        });

        assert_eq!(response.next_possible_states, vec![Parsed, Approved, Cancelled]);
        assert_eq!(response.available_transitions.len(), 3);
        let events: Vec<_> = response
            .available_transitions
            .iter()
            .map(|t| t.trigger_event.as_str())
            .collect();
        assert!(events.contains(&"technical_approval"));
        for option in &response.available_transitions {
            assert_eq!(option.allowed_target_states, vec![Parsed, Approved, Cancelled]);
            assert!(option.roles_allowed.contains(&"engineering".to_string()));
        }
    }

    #[test]
    fn next_states_empty_for_archived() {
        let response = next_states(NextStatesRequest {
            component_id: "CMP-042".to_string(),
            current_status: Archived,
        });
        assert!(response.next_possible_states.is_empty());
        assert!(response.available_transitions.is_empty());
    }
}
