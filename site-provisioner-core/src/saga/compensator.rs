//! Rollback Compensator
//!
//! Undoes whatever a failed run created, in reverse order of creation: hosting domain, then
//! DNS records. The zone itself is kept, and a purchased domain cannot be undone at all; the
//! report carries a manual-action notice instead.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use site_provisioner_provider::{DnsProvider, HostingPlatform};

use super::state::WorkflowState;

/// One undo action the compensator considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "recordId", rename_all = "camelCase")]
pub enum CompensationAction {
    RemoveHostingDomain,
    /// Placeholder for record cleanup when no record id exists to act on.
    DeleteDnsRecords,
    DeleteDnsRecord(String),
    ManualRegistrarAction,
}

impl fmt::Display for CompensationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveHostingDomain => f.write_str("remove hosting domain"),
            Self::DeleteDnsRecords => f.write_str("delete DNS records"),
            Self::DeleteDnsRecord(id) => write!(f, "delete DNS record {id}"),
            Self::ManualRegistrarAction => f.write_str("registrar follow-up"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "camelCase")]
pub enum CompensationOutcome {
    Succeeded,
    Failed(String),
    Skipped(String),
    ManualActionRequired(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationEntry {
    pub action: CompensationAction,
    pub outcome: CompensationOutcome,
}

impl CompensationEntry {
    fn new(action: CompensationAction, outcome: CompensationOutcome) -> Self {
        Self { action, outcome }
    }

    /// Whether the undo call was actually issued.
    pub fn attempted(&self) -> bool {
        matches!(
            self.outcome,
            CompensationOutcome::Succeeded | CompensationOutcome::Failed(_)
        )
    }
}

/// Everything the compensator did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationReport {
    pub entries: Vec<CompensationEntry>,
}

impl CompensationReport {
    fn push(&mut self, action: CompensationAction, outcome: CompensationOutcome) {
        self.entries.push(CompensationEntry::new(action, outcome));
    }

    /// Ids of the records a deletion was issued for, in deletion order.
    pub fn attempted_record_deletions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.attempted())
            .filter_map(|e| match &e.action {
                CompensationAction::DeleteDnsRecord(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CompensationEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, CompensationOutcome::Failed(_)))
    }

    pub fn requires_manual_action(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.outcome, CompensationOutcome::ManualActionRequired(_)))
    }

    /// Lines for the workflow's error list: failed undo calls and manual-action notices.
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                CompensationOutcome::Failed(msg) => {
                    Some(format!("Rollback failed to {}: {msg}", e.action))
                }
                CompensationOutcome::ManualActionRequired(msg) => Some(msg.clone()),
                CompensationOutcome::Succeeded | CompensationOutcome::Skipped(_) => None,
            })
            .collect()
    }
}

pub struct Compensator {
    dns: Arc<dyn DnsProvider>,
    hosting: Arc<dyn HostingPlatform>,
}

impl Compensator {
    pub fn new(dns: Arc<dyn DnsProvider>, hosting: Arc<dyn HostingPlatform>) -> Self {
        Self { dns, hosting }
    }

    /// Best-effort undo of `state`. Every action is attempted even when an earlier one
    /// failed; nothing here returns an error.
    pub async fn compensate(&self, state: &WorkflowState) -> CompensationReport {
        let domain = state.domain.as_str();
        let mut report = CompensationReport::default();
        log::warn!("[{domain}] Compensating: {state:?}");

        if state.hosting_domain_added {
            let outcome = match self.hosting.remove_domain(domain).await {
                Ok(()) => {
                    log::info!("[{domain}] Removed domain from {}", self.hosting.id());
                    CompensationOutcome::Succeeded
                }
                Err(e) => {
                    log::error!("[{domain}] Failed to remove hosting domain: {e}");
                    CompensationOutcome::Failed(e.to_string())
                }
            };
            report.push(CompensationAction::RemoveHostingDomain, outcome);
        } else {
            report.push(
                CompensationAction::RemoveHostingDomain,
                CompensationOutcome::Skipped("domain was not added to the hosting platform".to_string()),
            );
        }

        match state.zone_id.as_deref() {
            Some(zone_id) if !state.created_record_ids.is_empty() => {
                for record_id in state.created_record_ids.iter().rev() {
                    let outcome = match self.dns.delete_record(zone_id, record_id).await {
                        Ok(()) => {
                            log::info!("[{domain}] Deleted DNS record {record_id}");
                            CompensationOutcome::Succeeded
                        }
                        Err(e) => {
                            log::error!("[{domain}] Failed to delete DNS record {record_id}: {e}");
                            CompensationOutcome::Failed(e.to_string())
                        }
                    };
                    report.push(CompensationAction::DeleteDnsRecord(record_id.clone()), outcome);
                }
            }
            Some(_) => report.push(
                CompensationAction::DeleteDnsRecords,
                CompensationOutcome::Skipped("no DNS records were created".to_string()),
            ),
            None => report.push(
                CompensationAction::DeleteDnsRecords,
                CompensationOutcome::Skipped("no zone was created".to_string()),
            ),
        }

        if state.domain_purchased {
            let notice = format!(
                "MANUAL ACTION REQUIRED: {domain} was purchased and cannot be refunded automatically; \
                 review it at the registrar"
            );
            log::error!("[{domain}] {notice}");
            report.push(
                CompensationAction::ManualRegistrarAction,
                CompensationOutcome::ManualActionRequired(notice),
            );
        } else {
            report.push(
                CompensationAction::ManualRegistrarAction,
                CompensationOutcome::Skipped("domain was not purchased".to_string()),
            );
        }

        report
    }
}
