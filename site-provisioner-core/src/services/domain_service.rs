//! 域名查询服务

use std::sync::Arc;

use site_provisioner_provider::DomainAvailability;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::utils::domain::validate_domain;

/// Read-only registrar queries, usable without starting a workflow.
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 检查域名是否可注册
    pub async fn check_availability(&self, domain: &str) -> CoreResult<DomainAvailability> {
        let domain = validate_domain(domain)?;
        self.ctx
            .registrar
            .check_availability(&domain)
            .await
            .map_err(|e| self.ctx.provider_error("Availability check", e))
    }
}
