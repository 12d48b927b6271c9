//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::config::CloudflareConfig;
use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare DNS provider implementation.
///
/// Authenticates with a scoped API token. New zones are created in the configured account.
///
/// # Construction
///
/// ```rust,no_run
/// use site_provisioner_provider::{CloudflareConfig, CloudflareProvider};
///
/// let provider = CloudflareProvider::new(&CloudflareConfig {
///     api_token: "your-token".to_string(),
///     account_id: "your-account-id".to_string(),
/// })?;
/// # Ok::<(), site_provisioner_provider::ProviderError>(())
/// ```
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) account_id: String,
}

impl CloudflareProvider {
    pub fn new(config: &CloudflareConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
            api_token: config.api_token.clone(),
            account_id: config.account_id.clone(),
        })
    }
}
