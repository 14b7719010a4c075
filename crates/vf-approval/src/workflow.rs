// workflow.rs — Sequential multi-party approval chains.
//
// A workflow is an ordered list of named steps ("Procurement Manager",
// then "Finance Director"). Decisions are strictly sequential: only the
// step at `current_step` can be decided, a rejection settles the whole
// workflow immediately (fail-fast, not resumable), and approving the last
// step settles it as approved. Skipping, delegation, and quorum rules are
// deliberate non-features of this design — they would be extensions (an
// `optional` flag per step), not a redesign.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApprovalError;

/// Decision status of one approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Approved,
    Rejected,
    Skipped,
}

/// Overall workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStatus::Pending => "pending",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// The decision submitted for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

/// One named gate in the sign-off chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub name: String,
    /// Role expected to decide this step.
    pub role: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApprovalStep {
    fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            status: StepStatus::Pending,
            decided_by: None,
            decided_at: None,
            notes: None,
        }
    }
}

/// A sequential approval workflow attached to a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    pub workflow_id: Uuid,
    pub po_id: String,
    pub steps: Vec<ApprovalStep>,
    /// Index of the step awaiting a decision. Meaningless once settled.
    pub current_step: usize,
    pub status: WorkflowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApprovalWorkflow {
    /// Create an empty workflow for a purchase order. Add steps with
    /// [`with_step`](Self::with_step) before use.
    pub fn new(po_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            workflow_id: Uuid::new_v4(),
            po_id: po_id.into(),
            steps: Vec::new(),
            current_step: 0,
            status: WorkflowStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a named step (builder pattern).
    pub fn with_step(mut self, name: impl Into<String>, role: impl Into<String>) -> Self {
        self.steps.push(ApprovalStep::new(name, role));
        self
    }

    /// Whether the workflow has reached a final decision.
    pub fn is_settled(&self) -> bool {
        self.status != WorkflowStatus::Pending
    }

    /// The step currently awaiting a decision, if any.
    pub fn current(&self) -> Option<&ApprovalStep> {
        if self.is_settled() {
            return None;
        }
        self.steps.get(self.current_step)
    }

    /// Steps still awaiting a decision, in order.
    pub fn remaining_steps(&self) -> Vec<&ApprovalStep> {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Pending)
            .collect()
    }

    /// Record a decision on the current step and advance the workflow.
    ///
    /// Rejection settles the workflow immediately; later steps are never
    /// executed. Approval moves to the next step, or settles the workflow
    /// as approved when no steps remain. At most one decision is accepted
    /// per step — deciding a settled workflow is an error.
    pub fn advance(
        &mut self,
        action: ApprovalAction,
        decided_by: &str,
        notes: Option<String>,
    ) -> Result<WorkflowStatus, ApprovalError> {
        if self.is_settled() {
            return Err(ApprovalError::AlreadySettled(self.status));
        }
        let index = self.current_step;
        let step = self
            .steps
            .get_mut(index)
            .ok_or(ApprovalError::NoPendingStep)?;

        step.decided_by = Some(decided_by.to_string());
        step.decided_at = Some(Utc::now());
        step.notes = notes;

        match action {
            ApprovalAction::Reject => {
                step.status = StepStatus::Rejected;
                self.status = WorkflowStatus::Rejected;
            }
            ApprovalAction::Approve => {
                step.status = StepStatus::Approved;
                if index + 1 < self.steps.len() {
                    self.current_step = index + 1;
                } else {
                    self.status = WorkflowStatus::Approved;
                }
            }
        }
        self.updated_at = Utc::now();
        info!(
            workflow_id = %self.workflow_id,
            po_id = %self.po_id,
            step = %self.steps[index].name,
            ?action,
            status = %self.status,
            "approval decision recorded"
        );
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_workflow() -> ApprovalWorkflow {
        ApprovalWorkflow::new("PO-1042")
            .with_step("Procurement sign-off", "procurement_manager")
            .with_step("Finance sign-off", "finance_director")
    }

    #[test]
    fn new_workflow_is_pending_at_first_step() {
        let wf = two_step_workflow();
        assert_eq!(wf.status, WorkflowStatus::Pending);
        assert_eq!(wf.current_step, 0);
        assert_eq!(wf.current().map(|s| s.name.as_str()), Some("Procurement sign-off"));
        assert_eq!(wf.remaining_steps().len(), 2);
    }

    #[test]
    fn approving_intermediate_step_advances_and_stays_pending() {
        let mut wf = two_step_workflow();
        let status = wf.advance(ApprovalAction::Approve, "pm-01", None).unwrap();
        assert_eq!(status, WorkflowStatus::Pending);
        assert_eq!(wf.current_step, 1);
        assert_eq!(wf.steps[0].status, StepStatus::Approved);
        assert_eq!(wf.steps[0].decided_by.as_deref(), Some("pm-01"));
        assert!(wf.steps[0].decided_at.is_some());
    }

    #[test]
    fn approving_last_step_settles_workflow() {
        let mut wf = two_step_workflow();
        wf.advance(ApprovalAction::Approve, "pm-01", None).unwrap();
        let status = wf.advance(ApprovalAction::Approve, "fd-01", None).unwrap();
        assert_eq!(status, WorkflowStatus::Approved);
        assert!(wf.is_settled());
        assert!(wf.current().is_none());
        assert!(wf.remaining_steps().is_empty());
    }

    #[test]
    fn rejection_settles_immediately_and_skips_later_steps() {
        let mut wf = two_step_workflow();
        let status = wf
            .advance(
                ApprovalAction::Reject,
                "pm-01",
                Some("budget exceeded".to_string()),
            )
            .unwrap();
        assert_eq!(status, WorkflowStatus::Rejected);
        assert_eq!(wf.steps[0].status, StepStatus::Rejected);
        assert_eq!(wf.steps[0].notes.as_deref(), Some("budget exceeded"));
        // The second step was never executed.
        assert_eq!(wf.steps[1].status, StepStatus::Pending);
    }

    #[test]
    fn settled_workflow_rejects_further_decisions() {
        let mut wf = two_step_workflow();
        wf.advance(ApprovalAction::Reject, "pm-01", None).unwrap();
        let result = wf.advance(ApprovalAction::Approve, "fd-01", None);
        assert!(matches!(result, Err(ApprovalError::AlreadySettled(_))));
    }

    #[test]
    fn empty_workflow_has_no_pending_step() {
        let mut wf = ApprovalWorkflow::new("PO-0");
        let result = wf.advance(ApprovalAction::Approve, "pm-01", None);
        assert!(matches!(result, Err(ApprovalError::NoPendingStep)));
    }

    #[test]
    fn workflow_serialization_round_trip() {
        let mut wf = two_step_workflow();
        wf.advance(ApprovalAction::Approve, "pm-01", None).unwrap();
        let json = serde_json::to_string(&wf).unwrap();
        let restored: ApprovalWorkflow = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.workflow_id, wf.workflow_id);
        assert_eq!(restored.current_step, 1);
        assert_eq!(restored.steps[0].status, StepStatus::Approved);
    }
}
