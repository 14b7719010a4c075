// approval_api.rs — Approval decision contract.
//
// One decision per call, applied to the workflow's current step. The role
// on the request must match the step's expected role — the PO status graph
// itself is adjacency-only, but a named sign-off gate is meaningless if
// anyone can decide it.

use serde::{Deserialize, Serialize};

use vf_approval::{ApprovalAction, ApprovalError, ApprovalWorkflow, WorkflowStatus};

/// A decision on the current step of a purchase-order approval workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecisionRequest {
    pub po_id: String,
    pub approver_id: String,
    pub approver_role: String,
    pub action: ApprovalAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecisionResponse {
    /// Whether the decided step was approved (false on rejection).
    pub step_approved: bool,
    /// Overall workflow status after the decision.
    pub new_status: WorkflowStatus,
    /// Full workflow snapshot for the caller to persist/render.
    pub workflow_state: ApprovalWorkflow,
    /// What happens next, in plain words.
    pub next_actions: Vec<String>,
}

/// Apply an approval decision to a workflow.
///
/// Errors cover out-of-contract calls: a settled workflow, an empty one,
/// or a decision from the wrong role.
pub fn submit_approval_decision(
    request: ApprovalDecisionRequest,
    workflow: &mut ApprovalWorkflow,
) -> Result<ApprovalDecisionResponse, ApprovalError> {
    let step = workflow.current().ok_or_else(|| {
        if workflow.is_settled() {
            ApprovalError::AlreadySettled(workflow.status)
        } else {
            ApprovalError::NoPendingStep
        }
    })?;
    if step.role != request.approver_role {
        return Err(ApprovalError::WrongRole {
            step: step.name.clone(),
            expected: step.role.clone(),
            actual: request.approver_role,
        });
    }

    let new_status = workflow.advance(request.action, &request.approver_id, request.notes)?;

    let next_actions = match new_status {
        WorkflowStatus::Pending => workflow
            .remaining_steps()
            .iter()
            .map(|step| format!("await {} decision on '{}'", step.role, step.name))
            .collect(),
        WorkflowStatus::Approved => vec![format!("issue purchase order {}", workflow.po_id)],
        WorkflowStatus::Rejected => {
            vec![format!("return purchase order {} to draft for rework", workflow.po_id)]
        }
    };

    Ok(ApprovalDecisionResponse {
        step_approved: matches!(request.action, ApprovalAction::Approve),
        new_status,
        workflow_state: workflow.clone(),
        next_actions,
    })
}
