//! Workflow steps and saga stages

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The seven provisioning steps, in execution order.
///
/// `Display` and serde use the camelCase flag name (`"zoneCreated"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStep {
    AvailabilityCheck,
    DomainPurchase,
    ZoneCreated,
    NameserversSet,
    DnsRecords,
    HostingDomainAdded,
    HostingVerified,
}

impl WorkflowStep {
    pub const ALL: [Self; 7] = [
        Self::AvailabilityCheck,
        Self::DomainPurchase,
        Self::ZoneCreated,
        Self::NameserversSet,
        Self::DnsRecords,
        Self::HostingDomainAdded,
        Self::HostingVerified,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AvailabilityCheck => "availabilityCheck",
            Self::DomainPurchase => "domainPurchase",
            Self::ZoneCreated => "zoneCreated",
            Self::NameserversSet => "nameserversSet",
            Self::DnsRecords => "dnsRecords",
            Self::HostingDomainAdded => "hostingDomainAdded",
            Self::HostingVerified => "hostingVerified",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a run in the linear state machine.
///
/// `Init → AvailabilityChecked → Purchased → ZoneCreated → NameserversSet → RecordsCreated →
/// HostingAdded → Verified`; any non-terminal stage may move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SagaStage {
    Init,
    AvailabilityChecked,
    Purchased,
    ZoneCreated,
    NameserversSet,
    RecordsCreated,
    HostingAdded,
    Verified,
    Failed,
}

impl SagaStage {
    /// The step that leads out of this stage, or `None` when terminal.
    pub fn next_step(self) -> Option<WorkflowStep> {
        match self {
            Self::Init => Some(WorkflowStep::AvailabilityCheck),
            Self::AvailabilityChecked => Some(WorkflowStep::DomainPurchase),
            Self::Purchased => Some(WorkflowStep::ZoneCreated),
            Self::ZoneCreated => Some(WorkflowStep::NameserversSet),
            Self::NameserversSet => Some(WorkflowStep::DnsRecords),
            Self::RecordsCreated => Some(WorkflowStep::HostingDomainAdded),
            Self::HostingAdded => Some(WorkflowStep::HostingVerified),
            Self::Verified | Self::Failed => None,
        }
    }

    /// The stage reached once `step` has been carried out.
    pub fn after(step: WorkflowStep) -> Self {
        match step {
            WorkflowStep::AvailabilityCheck => Self::AvailabilityChecked,
            WorkflowStep::DomainPurchase => Self::Purchased,
            WorkflowStep::ZoneCreated => Self::ZoneCreated,
            WorkflowStep::NameserversSet => Self::NameserversSet,
            WorkflowStep::DnsRecords => Self::RecordsCreated,
            WorkflowStep::HostingDomainAdded => Self::HostingAdded,
            WorkflowStep::HostingVerified => Self::Verified,
        }
    }

    /// Moves past `step`. Only the successor of the current stage is accepted.
    pub fn advance(self, step: WorkflowStep) -> CoreResult<Self> {
        if self.next_step() == Some(step) {
            Ok(Self::after(step))
        } else {
            Err(CoreError::Validation(format!(
                "illegal saga transition: {self:?} cannot perform {step}"
            )))
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Verified | Self::Failed)
    }
}
