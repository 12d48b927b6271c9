//! Per-run workflow input and mutable state

use serde::{Deserialize, Serialize};

/// Input of one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub domain: String,
    /// Registration period. Defaults to 1.
    pub years: u32,
    /// Enable WHOIS privacy. Defaults to `true`.
    pub whois_guard: bool,
}

impl WorkflowRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            years: 1,
            whois_guard: true,
        }
    }

    #[must_use]
    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    #[must_use]
    pub fn with_whois_guard(mut self, whois_guard: bool) -> Self {
        self.whois_guard = whois_guard;
        self
    }
}

/// What a run has created so far; the compensator's only input.
///
/// Each field is set right after the call that created the resource succeeds, never
/// before and never retroactively.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub domain: String,
    pub years: u32,
    pub whois_guard: bool,
    /// Irreversible: there is no undo for a purchase.
    pub domain_purchased: bool,
    pub zone_id: Option<String>,
    /// In creation order.
    pub created_record_ids: Vec<String>,
    pub hosting_domain_added: bool,
}

impl WorkflowState {
    /// Fresh state for `domain` (already normalized) with the request's options.
    pub fn new(domain: impl Into<String>, request: &WorkflowRequest) -> Self {
        Self {
            domain: domain.into(),
            years: request.years,
            whois_guard: request.whois_guard,
            ..Self::default()
        }
    }

    pub fn mark_purchased(&mut self) {
        self.domain_purchased = true;
    }

    pub fn set_zone(&mut self, zone_id: impl Into<String>) {
        self.zone_id = Some(zone_id.into());
    }

    pub fn record_created(&mut self, record_id: impl Into<String>) {
        self.created_record_ids.push(record_id.into());
    }

    pub fn mark_hosting_added(&mut self) {
        self.hosting_domain_added = true;
    }
}
