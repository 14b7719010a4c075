// record.rs — The transition audit record.
//
// One record per accepted transition, created by the service layer after
// validation passes. Records are append-only and never mutated; the
// builder-style `with_*` setters only apply before the record is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vf_lifecycle::ComponentStatus;

/// Audit artifact for one accepted lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,

    /// The component that transitioned.
    pub component_id: String,

    pub from: ComponentStatus,
    pub to: ComponentStatus,

    /// When the transition was accepted (UTC).
    pub timestamp: DateTime<Utc>,

    /// The business event that accompanied the transition request.
    pub trigger_event: String,

    /// Arbitrary event payload supplied with the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_data: Option<serde_json::Value>,

    /// Who requested the transition.
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransitionRecord {
    /// Create a record with the current timestamp and a random id.
    pub fn new(
        component_id: impl Into<String>,
        from: ComponentStatus,
        to: ComponentStatus,
        trigger_event: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            component_id: component_id.into(),
            from,
            to,
            timestamp: Utc::now(),
            trigger_event: trigger_event.into(),
            trigger_data: None,
            user_id: user_id.into(),
            notes: None,
        }
    }

    /// Attach the event payload and return self (builder pattern).
    pub fn with_trigger_data(mut self, data: serde_json::Value) -> Self {
        self.trigger_data = Some(data);
        self
    }

    /// Attach free-form notes and return self.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
