// status.rs — The closed set of component lifecycle statuses.
//
// Making the status a Rust enum (rather than a string) removes the whole
// "unknown status" failure mode from the core: once a value of this type
// exists, every lookup on it is total. Dynamic validation only happens at
// the deserialization boundary, where `FromStr` fails with a typed error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Lifecycle status of a tracked component, from first data entry through
/// procurement, operation, and end of life.
///
/// `archived` is terminal — it has no outbound transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    /// Entered manually or from an uploaded datasheet, not yet processed.
    Draft,
    /// Datasheet parsed into structured attributes.
    Parsed,
    /// Attributes enriched from reference catalogs.
    Enriched,
    /// Awaiting duplicate detection against the existing catalog.
    DedupePending,
    /// Awaiting compliance and certification review.
    CompliancePending,
    /// Technically and commercially approved for use in designs.
    Approved,
    /// Published to the design catalog.
    Available,
    /// Supplier sourcing in progress.
    Sourcing,
    /// Request for quotation open to suppliers.
    RfqOpen,
    /// A supplier bid has been selected.
    RfqAwarded,
    /// Purchase requisition raised, purchase order in preparation.
    Purchasing,
    /// Purchase order issued to the supplier.
    Ordered,
    /// In transit from the supplier.
    Shipped,
    /// Received at the warehouse or site.
    Received,
    /// Physically installed at the site.
    Installed,
    /// Commissioning tests completed.
    Commissioned,
    /// In productive operation.
    Operational,
    /// Operating under an active warranty claim or registration.
    WarrantyActive,
    /// Withdrawn from operation for maintenance.
    Maintenance,
    /// Permanently withdrawn from operation.
    Retired,
    /// In the recycling / disposal process.
    Recycling,
    /// Held back due to a data-quality or inspection problem.
    Quarantine,
    /// Returned to the supplier.
    Returned,
    /// Cancelled before reaching operation.
    Cancelled,
    /// Record closed. Terminal.
    Archived,
}

impl ComponentStatus {
    /// Every status, in canonical declaration order.
    pub const ALL: [ComponentStatus; 25] = [
        ComponentStatus::Draft,
        ComponentStatus::Parsed,
        ComponentStatus::Enriched,
        ComponentStatus::DedupePending,
        ComponentStatus::CompliancePending,
        ComponentStatus::Approved,
        ComponentStatus::Available,
        ComponentStatus::Sourcing,
        ComponentStatus::RfqOpen,
        ComponentStatus::RfqAwarded,
        ComponentStatus::Purchasing,
        ComponentStatus::Ordered,
        ComponentStatus::Shipped,
        ComponentStatus::Received,
        ComponentStatus::Installed,
        ComponentStatus::Commissioned,
        ComponentStatus::Operational,
        ComponentStatus::WarrantyActive,
        ComponentStatus::Maintenance,
        ComponentStatus::Retired,
        ComponentStatus::Recycling,
        ComponentStatus::Quarantine,
        ComponentStatus::Returned,
        ComponentStatus::Cancelled,
        ComponentStatus::Archived,
    ];

    /// The wire name of this status (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Draft => "draft",
            ComponentStatus::Parsed => "parsed",
            ComponentStatus::Enriched => "enriched",
            ComponentStatus::DedupePending => "dedupe_pending",
            ComponentStatus::CompliancePending => "compliance_pending",
            ComponentStatus::Approved => "approved",
            ComponentStatus::Available => "available",
            ComponentStatus::Sourcing => "sourcing",
            ComponentStatus::RfqOpen => "rfq_open",
            ComponentStatus::RfqAwarded => "rfq_awarded",
            ComponentStatus::Purchasing => "purchasing",
            ComponentStatus::Ordered => "ordered",
            ComponentStatus::Shipped => "shipped",
            ComponentStatus::Received => "received",
            ComponentStatus::Installed => "installed",
            ComponentStatus::Commissioned => "commissioned",
            ComponentStatus::Operational => "operational",
            ComponentStatus::WarrantyActive => "warranty_active",
            ComponentStatus::Maintenance => "maintenance",
            ComponentStatus::Retired => "retired",
            ComponentStatus::Recycling => "recycling",
            ComponentStatus::Quarantine => "quarantine",
            ComponentStatus::Returned => "returned",
            ComponentStatus::Cancelled => "cancelled",
            ComponentStatus::Archived => "archived",
        }
    }

    /// Whether this status has no outbound transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ComponentStatus::Archived)
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownStatus(s.to_string()))
    }
}

/// Coarse lifecycle stage a status belongs to. Display-only grouping for
/// progress views and stakeholder dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Design,
    Catalog,
    Procurement,
    Logistics,
    Deployment,
    Operations,
    EndOfLife,
    Exception,
}

impl LifecycleStage {
    /// Every stage, in lifecycle order. `Exception` sorts last because it
    /// sits outside the main line.
    pub const ALL: [LifecycleStage; 8] = [
        LifecycleStage::Design,
        LifecycleStage::Catalog,
        LifecycleStage::Procurement,
        LifecycleStage::Logistics,
        LifecycleStage::Deployment,
        LifecycleStage::Operations,
        LifecycleStage::EndOfLife,
        LifecycleStage::Exception,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Design => "design",
            LifecycleStage::Catalog => "catalog",
            LifecycleStage::Procurement => "procurement",
            LifecycleStage::Logistics => "logistics",
            LifecycleStage::Deployment => "deployment",
            LifecycleStage::Operations => "operations",
            LifecycleStage::EndOfLife => "end_of_life",
            LifecycleStage::Exception => "exception",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStage {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownStage(s.to_string()))
    }
}
