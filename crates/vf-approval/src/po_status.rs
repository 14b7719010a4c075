// po_status.rs — Purchase-order status graph.
//
// Unlike the component lifecycle, purchase orders are validated by
// adjacency only: no trigger events, no role guards. The graph is a second
// instantiation of the generic TransitionGraph, so path finding and
// reachability come for free.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use vf_lifecycle::TransitionGraph;

use crate::error::ApprovalError;

/// Purchase-order status. `completed` and `cancelled` are terminal;
/// `on_hold` is a side state reachable from any active status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoStatus {
    Draft,
    PendingApproval,
    Approved,
    Issued,
    Received,
    Completed,
    Cancelled,
    OnHold,
}

impl PoStatus {
    pub const ALL: [PoStatus; 8] = [
        PoStatus::Draft,
        PoStatus::PendingApproval,
        PoStatus::Approved,
        PoStatus::Issued,
        PoStatus::Received,
        PoStatus::Completed,
        PoStatus::Cancelled,
        PoStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoStatus::Draft => "draft",
            PoStatus::PendingApproval => "pending_approval",
            PoStatus::Approved => "approved",
            PoStatus::Issued => "issued",
            PoStatus::Received => "received",
            PoStatus::Completed => "completed",
            PoStatus::Cancelled => "cancelled",
            PoStatus::OnHold => "on_hold",
        }
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoStatus {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ApprovalError::UnknownPoStatus(s.to_string()))
    }
}

/// The purchase-order adjacency graph.
pub fn po_status_graph() -> &'static TransitionGraph<PoStatus> {
    static GRAPH: OnceLock<TransitionGraph<PoStatus>> = OnceLock::new();
    GRAPH.get_or_init(|| {
        use PoStatus::*;
        let mut graph = TransitionGraph::new();
        graph.set_edges(Draft, [PendingApproval, Cancelled]);
        // A rejection sends the order back to draft for rework.
        graph.set_edges(PendingApproval, [Approved, Draft, OnHold, Cancelled]);
        graph.set_edges(Approved, [Issued, OnHold, Cancelled]);
        graph.set_edges(Issued, [Received, OnHold, Cancelled]);
        graph.set_edges(Received, [Completed]);
        graph.set_edges(OnHold, [PendingApproval, Approved, Issued, Cancelled]);
        // Completed and Cancelled are terminal: no edges.
        graph
    })
}

/// Allowed next statuses for a purchase order, in rule order.
pub fn next_po_statuses(current: PoStatus) -> Vec<PoStatus> {
    po_status_graph().next_states(current).to_vec()
}

/// Adjacency-only transition check.
pub fn is_valid_po_transition(from: PoStatus, to: PoStatus) -> bool {
    po_status_graph().is_valid_transition(from, to)
}
