//! Namecheap Registrar trait 实现

use async_trait::async_trait;

use crate::config::RegistrantContact;
use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, split_domain};
use crate::traits::{ErrorContext, ProviderErrorMapper, Registrar};
use crate::types::{DomainAvailability, PurchaseReceipt};

use super::NamecheapRegistrar;
use super::xml;

/// Contact roles `namecheap.domains.create` requires, each with the same field set.
const CONTACT_ROLES: [&str; 4] = ["Registrant", "Tech", "Admin", "AuxBilling"];

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

impl NamecheapRegistrar {
    /// `<Role>FirstName=...` style parameters for every contact role.
    pub(crate) fn contact_params(contact: &RegistrantContact) -> Vec<(String, String)> {
        let fields = [
            ("FirstName", Some(&contact.first_name)),
            ("LastName", Some(&contact.last_name)),
            ("OrganizationName", contact.organization_name.as_ref()),
            ("Address1", Some(&contact.address1)),
            ("City", Some(&contact.city)),
            ("StateProvince", Some(&contact.state_province)),
            ("PostalCode", Some(&contact.postal_code)),
            ("Country", Some(&contact.country)),
            ("Phone", Some(&contact.phone)),
            ("EmailAddress", Some(&contact.email_address)),
        ];

        CONTACT_ROLES
            .iter()
            .flat_map(|role| {
                fields.iter().filter_map(move |(field, value)| {
                    value.map(|v| (format!("{role}{field}"), v.clone()))
                })
            })
            .collect()
    }

    fn check_registrant(&self) -> Result<()> {
        let missing = self.registrant.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ProviderError::InvalidParameter {
            provider: self.provider_name().to_string(),
            param: "registrant".to_string(),
            detail: format!("missing contact fields: {}", missing.join(", ")),
        })
    }

    /// Reads a `namecheap.domains.create` response.
    ///
    /// After `Registered="true"` the domain is paid for, so missing ids are logged and left
    /// empty instead of failing the call.
    pub(crate) fn purchase_receipt(&self, domain: String, response: &str) -> Result<PurchaseReceipt> {
        let registered = xml::bool_attribute(response, "DomainCreateResult", "Registered")
            .ok_or_else(|| self.parse_error("DomainCreateResult.Registered missing"))?;
        if !registered {
            return Err(ProviderError::DomainUnavailable {
                provider: self.provider_name().to_string(),
                domain,
                raw_message: Some("Registered=false".to_string()),
            });
        }

        let domain_id = xml::attribute(response, "DomainCreateResult", "DomainID")
            .filter(|v| !v.is_empty());
        let transaction_id = xml::attribute(response, "DomainCreateResult", "TransactionID")
            .filter(|v| !v.is_empty());
        if domain_id.is_none() || transaction_id.is_none() {
            log::error!(
                "[namecheap] {domain} was registered but the response lacks DomainID or TransactionID"
            );
        }
        let charged_amount = xml::f64_attribute(response, "DomainCreateResult", "ChargedAmount");

        log::info!(
            "[namecheap] Registered {domain} (domain id {}, transaction {})",
            domain_id.as_deref().unwrap_or("?"),
            transaction_id.as_deref().unwrap_or("?")
        );
        Ok(PurchaseReceipt {
            domain_id,
            transaction_id,
            charged_amount,
        })
    }

    fn split(&self, domain: &str) -> Result<(String, String)> {
        split_domain(domain)
            .map(|(sld, tld)| (sld.to_string(), tld.to_string()))
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "domain".to_string(),
                detail: format!("'{domain}' has no top-level domain"),
            })
    }
}

#[async_trait]
impl Registrar for NamecheapRegistrar {
    fn id(&self) -> &'static str {
        "namecheap"
    }

    async fn check_availability(&self, domain: &str) -> Result<DomainAvailability> {
        let domain = normalize_domain_name(domain);
        let response = self
            .execute(
                "namecheap.domains.check",
                &[("DomainList", domain.clone())],
                ErrorContext::for_domain(&domain),
            )
            .await?;

        let available = xml::bool_attribute(&response, "DomainCheckResult", "Available")
            .ok_or_else(|| self.parse_error("DomainCheckResult.Available missing"))?;
        let is_premium =
            xml::bool_attribute(&response, "DomainCheckResult", "IsPremiumName").unwrap_or(false);
        let price = if is_premium {
            xml::f64_attribute(&response, "DomainCheckResult", "PremiumRegistrationPrice")
        } else {
            None
        };

        log::info!("[namecheap] {domain}: available={available}, premium={is_premium}");
        Ok(DomainAvailability {
            domain,
            available,
            is_premium,
            price,
        })
    }

    async fn purchase(
        &self,
        domain: &str,
        years: u32,
        whois_guard: bool,
    ) -> Result<PurchaseReceipt> {
        // 缺少联系人信息时不发起扣费请求
        self.check_registrant()?;
        let domain = normalize_domain_name(domain);

        let contacts = Self::contact_params(&self.registrant);
        let mut params: Vec<(&str, String)> = vec![
            ("DomainName", domain.clone()),
            ("Years", years.to_string()),
            ("AddFreeWhoisguard", yes_no(whois_guard)),
            ("WGEnabled", yes_no(whois_guard)),
        ];
        params.extend(contacts.iter().map(|(k, v)| (k.as_str(), v.clone())));

        let response = self
            .execute("namecheap.domains.create", &params, ErrorContext::for_domain(&domain))
            .await?;

        self.purchase_receipt(domain, &response)
    }

    async fn delegate_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        if nameservers.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "nameservers".to_string(),
                detail: "at least one nameserver is required".to_string(),
            });
        }

        let domain = normalize_domain_name(domain);
        let (sld, tld) = self.split(&domain)?;
        let response = self
            .execute(
                "namecheap.domains.dns.setCustom",
                &[
                    ("SLD", sld),
                    ("TLD", tld),
                    ("Nameservers", nameservers.join(",")),
                ],
                ErrorContext::for_domain(&domain),
            )
            .await?;

        if xml::bool_attribute(&response, "DomainDNSSetCustomResult", "Updated") != Some(true) {
            return Err(self.parse_error("DomainDNSSetCustomResult.Updated is not true"));
        }

        log::info!("[namecheap] Delegated {domain} to {}", nameservers.join(", "));
        Ok(())
    }
}
