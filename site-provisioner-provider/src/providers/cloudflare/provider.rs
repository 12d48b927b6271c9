//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::relative_to_full_name;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{DnsRecord, ZoneCreation, ZoneState, ZoneStatus};

use super::types::{AccountRef, CreateRecordBody, CreateZoneBody};
use super::{CloudflareDnsRecord, CloudflareProvider, CloudflareZone};

/// Cloudflare 的 "automatic" TTL
const AUTO_TTL: u32 = 1;

impl CloudflareProvider {
    /// Cloudflare 状态：active, pending, initializing, moved, deactivated
    pub(crate) fn zone_to_status(zone: CloudflareZone) -> ZoneStatus {
        let status = match zone.status.as_str() {
            "active" => ZoneState::Active,
            "pending" | "initializing" => ZoneState::Pending,
            "moved" | "deactivated" => ZoneState::Moved,
            _ => ZoneState::Unknown,
        };

        ZoneStatus {
            zone_id: zone.id,
            name: zone.name,
            status,
            name_servers: zone.name_servers,
        }
    }

    /// 按名称查找 zone（限定在配置的账户下）
    pub(crate) async fn find_zone_by_name(&self, domain: &str) -> Result<Option<CloudflareZone>> {
        let path = format!(
            "/zones?name={}&account.id={}",
            urlencoding::encode(domain),
            urlencoding::encode(&self.account_id)
        );
        let zones: Vec<CloudflareZone> = self.get(&path, ErrorContext::for_domain(domain)).await?;
        Ok(zones.into_iter().next())
    }

    pub(crate) fn record_body(record: &DnsRecord, zone_name: &str) -> CreateRecordBody {
        CreateRecordBody {
            record_type: record.record_type.as_str(),
            name: relative_to_full_name(&record.name, zone_name),
            content: record.content.clone(),
            ttl: record.ttl.unwrap_or(AUTO_TTL),
            priority: record.priority,
            proxied: record.proxied,
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn create_zone(&self, domain: &str) -> Result<ZoneCreation> {
        let body = CreateZoneBody {
            name: domain,
            account: AccountRef {
                id: &self.account_id,
            },
            zone_type: "full",
            jump_start: false,
        };

        match self
            .post::<CloudflareZone, _>("/zones", &body, ErrorContext::for_domain(domain))
            .await
        {
            Ok(zone) => {
                log::info!("[cloudflare] Created zone {} for {domain}", zone.id);
                Ok(ZoneCreation {
                    zone_id: zone.id,
                    name_servers: zone.name_servers,
                    already_exists: false,
                })
            }
            Err(conflict @ ProviderError::AlreadyExists { .. }) => {
                // 已存在：取回现有 zone 复用
                let Some(zone) = self.find_zone_by_name(domain).await? else {
                    return Err(conflict);
                };
                log::info!("[cloudflare] Zone for {domain} already exists ({}), reusing it", zone.id);
                Ok(ZoneCreation {
                    zone_id: zone.id,
                    name_servers: zone.name_servers,
                    already_exists: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn create_record(&self, zone_id: &str, record: &DnsRecord) -> Result<String> {
        // 先获取 zone 信息（记录名需要完整域名）
        let zone: CloudflareZone = self
            .get(&format!("/zones/{zone_id}"), ErrorContext::default())
            .await?;

        let body = Self::record_body(record, &zone.name);
        let ctx = ErrorContext {
            resource: Some(record.label()),
            domain: Some(zone.name.clone()),
            ..ErrorContext::default()
        };

        let created: CloudflareDnsRecord = self
            .post(&format!("/zones/{zone_id}/dns_records"), &body, ctx)
            .await?;

        log::debug!("[cloudflare] Created {} as {}", record.label(), created.id);
        Ok(created.id)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            ..ErrorContext::default()
        };
        self.delete(&format!("/zones/{zone_id}/dns_records/{record_id}"), ctx)
            .await
    }

    async fn get_zone_status(&self, zone_id: &str) -> Result<Option<ZoneStatus>> {
        let ctx = ErrorContext {
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        match self.get::<CloudflareZone>(&format!("/zones/{zone_id}"), ctx).await {
            Ok(zone) => Ok(Some(Self::zone_to_status(zone))),
            Err(ProviderError::DomainNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DnsRecordType;

    fn zone(status: &str) -> CloudflareZone {
        CloudflareZone {
            id: "Z1".to_string(),
            name: "example.com".to_string(),
            status: status.to_string(),
            name_servers: vec!["ns1.x".to_string(), "ns2.x".to_string()],
        }
    }

    #[test]
    fn zone_status_mapping() {
        assert_eq!(
            CloudflareProvider::zone_to_status(zone("active")).status,
            ZoneState::Active
        );
        assert_eq!(
            CloudflareProvider::zone_to_status(zone("initializing")).status,
            ZoneState::Pending
        );
        assert_eq!(
            CloudflareProvider::zone_to_status(zone("moved")).status,
            ZoneState::Moved
        );
        assert_eq!(
            CloudflareProvider::zone_to_status(zone("weird")).status,
            ZoneState::Unknown
        );
    }

    #[test]
    fn zone_status_keeps_nameservers() {
        let status = CloudflareProvider::zone_to_status(zone("pending"));
        assert_eq!(status.zone_id, "Z1");
        assert_eq!(status.name_servers, vec!["ns1.x", "ns2.x"]);
    }

    #[test]
    fn record_body_uses_full_name_and_auto_ttl() {
        let record = DnsRecord::new(DnsRecordType::Cname, "www", "cname.vercel-dns.com");
        let body = CloudflareProvider::record_body(&record, "example.com");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "CNAME");
        assert_eq!(json["name"], "www.example.com");
        assert_eq!(json["ttl"], 1);
        assert!(json.get("proxied").is_none());
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn record_body_apex_with_options() {
        let record = DnsRecord::new(DnsRecordType::A, "@", "76.76.21.21")
            .with_ttl(300)
            .with_proxied(false);
        let body = CloudflareProvider::record_body(&record, "example.com");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["name"], "example.com");
        assert_eq!(json["ttl"], 300);
        assert_eq!(json["proxied"], false);
    }

    #[test]
    fn create_zone_body_shape() {
        let body = CreateZoneBody {
            name: "example.com",
            account: AccountRef { id: "acc" },
            zone_type: "full",
            jump_start: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["account"]["id"], "acc");
        assert_eq!(json["type"], "full");
        assert_eq!(json["jump_start"], false);
    }
}
