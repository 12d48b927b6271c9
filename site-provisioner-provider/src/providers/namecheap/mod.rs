//! Namecheap registrar

mod error;
mod http;
mod provider;
mod xml;

use reqwest::Client;

use crate::config::{NamecheapConfig, RegistrantContact};
use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) const NAMECHEAP_API_URL: &str = "https://api.namecheap.com/xml.response";
pub(crate) const NAMECHEAP_SANDBOX_API_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

/// Namecheap registrar implementation.
///
/// Every call carries `ApiUser`/`ApiKey`/`UserName`/`ClientIp` as form parameters; the
/// client IP must be whitelisted in the Namecheap account.
///
/// # Construction
///
/// ```rust,no_run
/// use site_provisioner_provider::{NamecheapConfig, NamecheapRegistrar};
///
/// let registrar = NamecheapRegistrar::new(&NamecheapConfig {
///     api_user: "alice".to_string(),
///     api_key: "your-key".to_string(),
///     client_ip: "203.0.113.7".to_string(),
///     sandbox: true,
///     ..NamecheapConfig::default()
/// })?;
/// # Ok::<(), site_provisioner_provider::ProviderError>(())
/// ```
pub struct NamecheapRegistrar {
    pub(crate) client: Client,
    pub(crate) endpoint: &'static str,
    pub(crate) api_user: String,
    pub(crate) api_key: String,
    pub(crate) username: String,
    pub(crate) client_ip: String,
    pub(crate) registrant: RegistrantContact,
}

impl NamecheapRegistrar {
    pub fn new(config: &NamecheapConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client("namecheap")?,
            endpoint: if config.sandbox {
                NAMECHEAP_SANDBOX_API_URL
            } else {
                NAMECHEAP_API_URL
            },
            api_user: config.api_user.clone(),
            api_key: config.api_key.clone(),
            username: config.effective_username().to_string(),
            client_ip: config.client_ip.clone(),
            registrant: config.registrant.clone(),
        })
    }
}
