//! 业务逻辑服务层

mod domain_service;
mod site_bootstrap_service;

pub use domain_service::DomainService;
pub use site_bootstrap_service::{BootstrapOutcome, SiteBootstrapService};

use std::sync::Arc;

use site_provisioner_provider::{
    create_dns_provider, create_hosting_platform, create_registrar, create_source_host,
    DnsProvider, HostingPlatform, ProviderError, Registrar, SourceHost,
};

use crate::config::ProvisionerConfig;
use crate::error::{CoreError, CoreResult};

/// 服务上下文 - 持有所有依赖
///
/// Built once from the configuration (or from mocks in tests) and shared by the saga and the
/// services.
pub struct ServiceContext {
    pub registrar: Arc<dyn Registrar>,
    pub dns: Arc<dyn DnsProvider>,
    /// Bound to one hosting project.
    pub hosting: Arc<dyn HostingPlatform>,
    /// Only needed by [`SiteBootstrapService`].
    pub source_host: Option<Arc<dyn SourceHost>>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        registrar: Arc<dyn Registrar>,
        dns: Arc<dyn DnsProvider>,
        hosting: Arc<dyn HostingPlatform>,
    ) -> Self {
        Self {
            registrar,
            dns,
            hosting,
            source_host: None,
        }
    }

    #[must_use]
    pub fn with_source_host(mut self, source_host: Arc<dyn SourceHost>) -> Self {
        self.source_host = Some(source_host);
        self
    }

    /// Builds the real adapters.
    ///
    /// `project_id` overrides `vercel.projectId`, so a project created by
    /// [`SiteBootstrapService`] can be provisioned in the same process.
    pub fn from_config(config: &ProvisionerConfig, project_id: Option<&str>) -> CoreResult<Self> {
        let project_id = project_id.or(config.vercel.project_id.as_deref());

        let mut ctx = Self::new(
            create_registrar(&config.namecheap)?,
            create_dns_provider(&config.cloudflare)?,
            create_hosting_platform(&config.vercel, project_id)?,
        );
        if let Some(github) = config.github.as_ref() {
            ctx = ctx.with_source_host(create_source_host(github)?);
        }
        Ok(ctx)
    }

    /// The source host, or a configuration error naming the missing section.
    pub fn source_host(&self) -> CoreResult<&Arc<dyn SourceHost>> {
        self.source_host
            .as_ref()
            .ok_or_else(|| CoreError::Config("github section is not configured".to_string()))
    }

    /// Logs a provider error at the level its kind calls for and wraps it.
    pub fn provider_error(&self, operation: &str, err: ProviderError) -> CoreError {
        if err.is_expected() {
            log::warn!("{operation} failed: {err}");
        } else {
            log::error!("{operation} failed: {err}");
        }
        CoreError::Provider(err)
    }
}
