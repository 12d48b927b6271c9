//! Vercel hosting platform

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::config::VercelConfig;
use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{VercelDomain, VercelErrorBody, VercelProject};

pub(crate) const VERCEL_API_BASE: &str = "https://api.vercel.com";

/// Vercel hosting platform implementation.
///
/// Domains are attached to a single project. The project id comes from configuration, or is
/// passed explicitly after `create_project` when bootstrapping a new site.
///
/// # Construction
///
/// ```rust,no_run
/// use site_provisioner_provider::{VercelConfig, VercelPlatform};
///
/// let platform = VercelPlatform::new(&VercelConfig {
///     token: "your-token".to_string(),
///     project_id: Some("prj_123".to_string()),
///     team_id: None,
/// })?;
/// # Ok::<(), site_provisioner_provider::ProviderError>(())
/// ```
pub struct VercelPlatform {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) project_id: Option<String>,
    pub(crate) team_id: Option<String>,
}

impl VercelPlatform {
    pub fn new(config: &VercelConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client("vercel")?,
            token: config.token.clone(),
            project_id: config.project_id.clone(),
            team_id: config.team_id.clone(),
        })
    }

    /// Same credentials, bound to `project_id` instead of the configured project.
    #[must_use]
    pub fn for_project(&self, project_id: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            token: self.token.clone(),
            project_id: Some(project_id.into()),
            team_id: self.team_id.clone(),
        }
    }
}
