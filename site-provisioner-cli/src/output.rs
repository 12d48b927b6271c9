//! Result rendering for the terminal

use std::fmt::Write as _;

use serde::Serialize;
use site_provisioner_core::{BootstrapOutcome, CompensationReport, WorkflowResult};
use site_provisioner_provider::DomainAvailability;

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub fn workflow(result: &WorkflowResult) -> String {
    let mut out = String::new();
    let headline = if result.success() {
        "provisioned"
    } else {
        "provisioning incomplete"
    };
    let _ = writeln!(out, "{}: {headline}", result.domain());

    for (step, done) in result.steps().iter() {
        let mark = if done { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{mark}] {step}");
    }

    let details = result.details();
    let _ = writeln!(out, "Details:");
    if let Some(tx) = &details.registrar_transaction_id {
        let _ = writeln!(out, "  registrar transaction: {tx}");
    }
    if let Some(id) = &details.registrar_domain_id {
        let _ = writeln!(out, "  registrar domain id:   {id}");
    }
    if let Some(zone) = &details.zone_id {
        let _ = writeln!(out, "  zone:                  {zone}");
    }
    let _ = writeln!(out, "  nameservers:           {}", list(&details.nameservers));
    let _ = writeln!(out, "  records:               {}", list(&details.record_ids));

    if !result.errors().is_empty() {
        let _ = writeln!(out, "Errors:");
        for error in result.errors() {
            let _ = writeln!(out, "  - {error}");
        }
    }
    out
}

pub fn aborted(reason: &str, report: &CompensationReport) -> String {
    let mut out = format!("workflow aborted: {reason}\n");
    let _ = writeln!(out, "Rollback:");
    for entry in &report.entries {
        let _ = writeln!(out, "  {}: {:?}", entry.action, entry.outcome);
    }
    out
}

pub fn availability(availability: &DomainAvailability) -> String {
    let mut out = format!(
        "{}: {}",
        availability.domain,
        if availability.available {
            "available"
        } else {
            "not available"
        }
    );
    if availability.is_premium {
        match availability.price {
            Some(price) => {
                let _ = write!(out, " (premium, {price:.2})");
            }
            None => out.push_str(" (premium)"),
        }
    }
    out
}

pub fn bootstrap(outcome: &BootstrapOutcome) -> String {
    let verb = if outcome.repository_created {
        "created"
    } else {
        "reused"
    };
    format!(
        "repository {verb}: {} ({})\nproject: {} ({})\nset vercel.projectId (or VERCEL_PROJECT_ID) to {}",
        outcome.repository.full_name,
        outcome.repository.html_url,
        outcome.project.name,
        outcome.project.id,
        outcome.project.id
    )
}
