use serde::{Deserialize, Serialize};

use crate::providers::common::full_name_to_relative;

// ============ DNS Record Types ============

/// DNS record types the provisioning workflow publishes.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Text record.
    Txt,
    /// Mail exchange record.
    Mx,
}

impl DnsRecordType {
    /// Wire name used by every supported API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
        }
    }

    /// Parses a record type case-insensitively. Returns `None` for unsupported types.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CNAME" => Some(Self::Cname),
            "TXT" => Some(Self::Txt),
            "MX" => Some(Self::Mx),
            _ => None,
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record to publish.
///
/// Plain value type: it carries no provider id. The id assigned by the provider is returned
/// separately from [`DnsProvider::create_record`](crate::DnsProvider::create_record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record name relative to the zone (`"@"` for the apex, `"www"`, `"_vercel"`).
    pub name: String,
    /// Record content (IP address, target hostname, text value).
    pub content: String,
    /// Time to live in seconds. `None` lets the provider pick (Cloudflare: automatic).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Enable the Cloudflare proxy (ignored by other providers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// MX priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    pub fn new(
        record_type: DnsRecordType,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            ttl: None,
            proxied: None,
            priority: None,
        }
    }

    /// Shorthand for a TXT record.
    pub fn txt(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(DnsRecordType::Txt, name, value)
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// `"<type> <name>"`, the form used in error reports.
    pub fn label(&self) -> String {
        format!("{} {}", self.record_type, self.name)
    }
}

// ============ Registrar Types ============

/// Result of a registrar availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailability {
    pub domain: String,
    pub available: bool,
    pub is_premium: bool,
    /// Registration price for premium names, in the registrar's account currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Receipt of a completed (irreversible) domain purchase.
///
/// The ids are optional: once the registrar confirms the registration the purchase has
/// happened, even if the confirmation omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charged_amount: Option<f64>,
}

// ============ Zone Types ============

/// Outcome of creating a DNS zone.
///
/// `already_exists` is set when the provider reported a conflict and the existing zone was
/// fetched instead; `zone_id` and `name_servers` then describe that existing zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCreation {
    pub zone_id: String,
    pub name_servers: Vec<String>,
    pub already_exists: bool,
}

/// Activation status of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneState {
    /// Nameservers are delegated and the zone is serving.
    Active,
    /// Waiting for nameserver delegation to be detected.
    Pending,
    /// Zone was moved away or deactivated.
    Moved,
    /// Status could not be determined.
    Unknown,
}

/// Snapshot of a zone as reported by the DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStatus {
    pub zone_id: String,
    pub name: String,
    pub status: ZoneState,
    pub name_servers: Vec<String>,
}

// ============ Batch Operation Types ============

/// Result of creating several records one after another.
///
/// `created_ids` is in creation order and contains every id that was actually created,
/// even when later records in the batch failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResult {
    pub created_ids: Vec<String>,
    pub failures: Vec<BatchCreateFailure>,
}

impl BatchCreateResult {
    /// `true` when no record failed.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.created_ids.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Information about a single failed record creation in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateFailure {
    /// Index of the failed record in the original slice.
    pub request_index: usize,
    pub record_type: DnsRecordType,
    pub record_name: String,
    pub reason: String,
}

impl std::fmt::Display for BatchCreateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.record_type, self.record_name, self.reason)
    }
}

// ============ Hosting Types ============

/// DNS record the hosting platform requires as proof of domain ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// Record type as reported by the platform (`"TXT"` in practice).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified record name (e.g. `"_vercel.example.com"`).
    pub name: String,
    pub value: String,
}

impl VerificationRecord {
    /// Converts the platform's requirement into a record relative to `zone_name`.
    ///
    /// Returns `None` when the record type is not one the DNS adapters can publish.
    pub fn to_dns_record(&self, zone_name: &str) -> Option<DnsRecord> {
        let record_type = DnsRecordType::parse(&self.record_type)?;
        Some(DnsRecord::new(
            record_type,
            full_name_to_relative(&self.name, zone_name),
            self.value.clone(),
        ))
    }
}

/// Outcome of attaching a domain to the hosting project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAddition {
    pub name: String,
    pub verified: bool,
    #[serde(default)]
    pub verification_records: Vec<VerificationRecord>,
    /// The domain was already attached to the project before this call.
    #[serde(default)]
    pub already_exists: bool,
}

impl DomainAddition {
    pub fn verification_required(&self) -> bool {
        !self.verified
    }
}

/// A hosting project (deployment target).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingProject {
    pub id: String,
    pub name: String,
}

// ============ Source Host Types ============

/// A source-control repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
    pub private: bool,
    pub default_branch: String,
}

/// Request to create a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
    /// Create an initial commit so the default branch exists.
    pub auto_init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parse_is_case_insensitive() {
        assert_eq!(DnsRecordType::parse("cname"), Some(DnsRecordType::Cname));
        assert_eq!(DnsRecordType::parse("AAAA"), Some(DnsRecordType::Aaaa));
        assert_eq!(DnsRecordType::parse("SRV"), None);
    }

    #[test]
    fn record_type_serializes_uppercase() {
        let json = serde_json::to_string(&DnsRecordType::Aaaa).unwrap();
        assert_eq!(json, "\"AAAA\"");
    }

    #[test]
    fn record_label() {
        let record = DnsRecord::new(DnsRecordType::Cname, "www", "cname.vercel-dns.com");
        assert_eq!(record.label(), "CNAME www");
    }

    #[test]
    fn record_builder_sets_optional_fields() {
        let record = DnsRecord::new(DnsRecordType::Mx, "@", "mail.example.com")
            .with_ttl(300)
            .with_priority(10)
            .with_proxied(false);
        assert_eq!(record.ttl, Some(300));
        assert_eq!(record.priority, Some(10));
        assert_eq!(record.proxied, Some(false));
    }

    #[test]
    fn batch_failure_display() {
        let failure = BatchCreateFailure {
            request_index: 1,
            record_type: DnsRecordType::Cname,
            record_name: "www".to_string(),
            reason: "[cloudflare] 'www' already exists".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "CNAME www: [cloudflare] 'www' already exists"
        );
    }

    #[test]
    fn verification_record_becomes_relative_txt() {
        let v = VerificationRecord {
            record_type: "TXT".to_string(),
            name: "_vercel.example.com".to_string(),
            value: "vc-domain-verify=example.com,abc".to_string(),
        };
        let record = v.to_dns_record("example.com").unwrap();
        assert_eq!(record.record_type, DnsRecordType::Txt);
        assert_eq!(record.name, "_vercel");
        assert_eq!(record.content, "vc-domain-verify=example.com,abc");
    }

    #[test]
    fn verification_record_with_unsupported_type() {
        let v = VerificationRecord {
            record_type: "HTTP".to_string(),
            name: "example.com".to_string(),
            value: "x".to_string(),
        };
        assert!(v.to_dns_record("example.com").is_none());
    }

    #[test]
    fn batch_result_counts() {
        let result = BatchCreateResult {
            created_ids: vec!["R1".to_string(), "R3".to_string()],
            failures: vec![BatchCreateFailure {
                request_index: 1,
                record_type: DnsRecordType::A,
                record_name: "@".to_string(),
                reason: "boom".to_string(),
            }],
        };
        assert!(!result.success());
        assert_eq!(result.success_count(), 2);
        assert_eq!(result.failed_count(), 1);
    }
}
