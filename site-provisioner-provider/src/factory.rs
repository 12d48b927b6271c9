//! Provider factory functions.
//!
//! Each function builds the concrete adapter for one concern from its configuration section
//! and returns it behind an `Arc<dyn Trait>`, ready to be shared by concurrent workflow runs.

use std::sync::Arc;

use crate::error::Result;

#[cfg(feature = "cloudflare")]
use crate::{config::CloudflareConfig, providers::CloudflareProvider, traits::DnsProvider};
#[cfg(feature = "github")]
use crate::{config::GithubConfig, providers::GithubSourceHost, traits::SourceHost};
#[cfg(feature = "vercel")]
use crate::{config::VercelConfig, providers::VercelPlatform, traits::HostingPlatform};
#[cfg(feature = "namecheap")]
use crate::{config::NamecheapConfig, providers::NamecheapRegistrar, traits::Registrar};

/// Creates the Namecheap [`Registrar`].
///
/// # Examples
///
/// ```rust,no_run
/// use site_provisioner_provider::{create_registrar, NamecheapConfig};
///
/// let registrar = create_registrar(&NamecheapConfig {
///     api_user: "alice".to_string(),
///     api_key: "your-key".to_string(),
///     client_ip: "203.0.113.7".to_string(),
///     ..NamecheapConfig::default()
/// })?;
/// assert_eq!(registrar.id(), "namecheap");
/// # Ok::<(), site_provisioner_provider::ProviderError>(())
/// ```
#[cfg(feature = "namecheap")]
pub fn create_registrar(config: &NamecheapConfig) -> Result<Arc<dyn Registrar>> {
    Ok(Arc::new(NamecheapRegistrar::new(config)?))
}

/// Creates the Cloudflare [`DnsProvider`].
#[cfg(feature = "cloudflare")]
pub fn create_dns_provider(config: &CloudflareConfig) -> Result<Arc<dyn DnsProvider>> {
    Ok(Arc::new(CloudflareProvider::new(config)?))
}

/// Creates the Vercel [`HostingPlatform`].
///
/// `project_id` overrides the configured project; pass the id returned by
/// [`HostingPlatform::create_project`] right after bootstrapping a site.
#[cfg(feature = "vercel")]
pub fn create_hosting_platform(
    config: &VercelConfig,
    project_id: Option<&str>,
) -> Result<Arc<dyn HostingPlatform>> {
    let platform = VercelPlatform::new(config)?;
    Ok(match project_id {
        Some(id) => Arc::new(platform.for_project(id)),
        None => Arc::new(platform),
    })
}

/// Creates the GitHub [`SourceHost`].
#[cfg(feature = "github")]
pub fn create_source_host(config: &GithubConfig) -> Result<Arc<dyn SourceHost>> {
    Ok(Arc::new(GithubSourceHost::new(config)?))
}

/// Identifiers of the adapters compiled into this build.
pub fn enabled_providers() -> Vec<&'static str> {
    vec![
        #[cfg(feature = "namecheap")]
        "namecheap",
        #[cfg(feature = "cloudflare")]
        "cloudflare",
        #[cfg(feature = "vercel")]
        "vercel",
        #[cfg(feature = "github")]
        "github",
    ]
}
