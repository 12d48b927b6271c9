//! Workflow result and its builder

use serde::{Deserialize, Serialize};

use super::compensator::CompensationReport;
use super::step::WorkflowStep;

/// One completion flag per step, serialized in execution order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFlags {
    pub availability_check: bool,
    pub domain_purchase: bool,
    pub zone_created: bool,
    pub nameservers_set: bool,
    pub dns_records: bool,
    pub hosting_domain_added: bool,
    pub hosting_verified: bool,
}

impl StepFlags {
    pub fn get(&self, step: WorkflowStep) -> bool {
        match step {
            WorkflowStep::AvailabilityCheck => self.availability_check,
            WorkflowStep::DomainPurchase => self.domain_purchase,
            WorkflowStep::ZoneCreated => self.zone_created,
            WorkflowStep::NameserversSet => self.nameservers_set,
            WorkflowStep::DnsRecords => self.dns_records,
            WorkflowStep::HostingDomainAdded => self.hosting_domain_added,
            WorkflowStep::HostingVerified => self.hosting_verified,
        }
    }

    fn set(&mut self, step: WorkflowStep, value: bool) {
        let flag = match step {
            WorkflowStep::AvailabilityCheck => &mut self.availability_check,
            WorkflowStep::DomainPurchase => &mut self.domain_purchase,
            WorkflowStep::ZoneCreated => &mut self.zone_created,
            WorkflowStep::NameserversSet => &mut self.nameservers_set,
            WorkflowStep::DnsRecords => &mut self.dns_records,
            WorkflowStep::HostingDomainAdded => &mut self.hosting_domain_added,
            WorkflowStep::HostingVerified => &mut self.hosting_verified,
        };
        *flag = value;
    }

    /// `(step, completed)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (WorkflowStep, bool)> + '_ {
        WorkflowStep::ALL.into_iter().map(|step| (step, self.get(step)))
    }

    pub fn all(&self) -> bool {
        self.iter().all(|(_, done)| done)
    }

    /// First step that did not complete.
    pub fn first_incomplete(&self) -> Option<WorkflowStep> {
        self.iter().find(|(_, done)| !done).map(|(step, _)| step)
    }
}

/// Identifiers collected along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_domain_id: Option<String>,
    #[serde(rename = "cloudflareZoneId", default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(default)]
    pub record_ids: Vec<String>,
}

/// Final report of one run. Built once by [`WorkflowResultBuilder::finish`], never mutated.
///
/// `success` is `true` exactly when every step flag is `true`, and then `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    domain: String,
    success: bool,
    steps: StepFlags,
    details: WorkflowDetails,
    errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compensation: Option<CompensationReport>,
}

impl WorkflowResult {
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn steps(&self) -> &StepFlags {
        &self.steps
    }

    pub fn step(&self, step: WorkflowStep) -> bool {
        self.steps.get(step)
    }

    pub fn details(&self) -> &WorkflowDetails {
        &self.details
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Rollback report, present only when compensation ran.
    pub fn compensation(&self) -> Option<&CompensationReport> {
        self.compensation.as_ref()
    }
}

/// Accumulates flags, details and error text while the saga runs.
#[derive(Debug, Default)]
pub struct WorkflowResultBuilder {
    domain: String,
    steps: StepFlags,
    details: WorkflowDetails,
    errors: Vec<String>,
    compensation: Option<CompensationReport>,
}

impl WorkflowResultBuilder {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn complete(&mut self, step: WorkflowStep) {
        self.steps.set(step, true);
    }

    /// Clears the step's flag and records why.
    pub fn fail(&mut self, step: WorkflowStep, error: impl Into<String>) {
        self.steps.set(step, false);
        self.errors.push(error.into());
    }

    pub fn details(&self) -> &WorkflowDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut WorkflowDetails {
        &mut self.details
    }

    /// Attaches the rollback report; its failures and manual-action notices join `errors`.
    pub fn compensation(&mut self, report: CompensationReport) {
        self.errors.extend(report.summary_lines());
        self.compensation = Some(report);
    }

    pub fn finish(mut self) -> WorkflowResult {
        let success = self.steps.all() && self.errors.is_empty();
        if !success && self.errors.is_empty() {
            if let Some(step) = self.steps.first_incomplete() {
                self.errors.push(format!("{step} did not complete"));
            }
        }

        WorkflowResult {
            domain: self.domain,
            success,
            steps: self.steps,
            details: self.details,
            errors: self.errors,
            compensation: self.compensation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_done() -> WorkflowResultBuilder {
        let mut builder = WorkflowResultBuilder::new("example.com");
        for step in WorkflowStep::ALL {
            builder.complete(step);
        }
        builder
    }

    #[test]
    fn success_requires_every_flag() {
        let result = all_done().finish();
        assert!(result.success());
        assert!(result.errors().is_empty());

        let mut builder = all_done();
        builder.fail(WorkflowStep::HostingVerified, "verification still pending");
        let result = builder.finish();
        assert!(!result.success());
        assert!(!result.step(WorkflowStep::HostingVerified));
        assert_eq!(result.errors(), ["verification still pending"]);
    }

    #[test]
    fn failure_without_error_text_gets_a_generic_one() {
        let mut builder = WorkflowResultBuilder::new("example.com");
        builder.complete(WorkflowStep::AvailabilityCheck);
        let result = builder.finish();
        assert!(!result.success());
        assert_eq!(result.errors(), ["domainPurchase did not complete"]);
    }

    #[test]
    fn serializes_flags_in_step_order() {
        let mut builder = WorkflowResultBuilder::new("example.com");
        builder.complete(WorkflowStep::AvailabilityCheck);
        builder.details_mut().zone_id = Some("Z1".to_string());
        let result = builder.finish();

        let text = serde_json::to_string(&result).unwrap();
        let positions: Vec<usize> = WorkflowStep::ALL
            .iter()
            .map(|s| text.find(&format!("\"{}\"", s.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["steps"]["availabilityCheck"], true);
        assert_eq!(json["details"]["cloudflareZoneId"], "Z1");
        assert!(json.get("compensation").is_none());
    }
}
