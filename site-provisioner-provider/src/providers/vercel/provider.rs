//! Vercel HostingPlatform trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, HostingPlatform, ProviderErrorMapper};
use crate::types::{DomainAddition, HostingProject, VerificationRecord};

use super::types::{AddDomainBody, CreateProjectBody, GitRepositoryRef};
use super::{VercelDomain, VercelPlatform, VercelProject};

impl VercelPlatform {
    fn project(&self) -> Result<&str> {
        self.project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "projectId".to_string(),
                detail: "no Vercel project configured".to_string(),
            })
    }

    fn domain_path(&self, domain: &str) -> Result<String> {
        Ok(format!(
            "/v9/projects/{}/domains/{}",
            urlencoding::encode(self.project()?),
            urlencoding::encode(domain)
        ))
    }

    pub(crate) fn to_addition(domain: VercelDomain, already_exists: bool) -> DomainAddition {
        DomainAddition {
            name: domain.name,
            verified: domain.verified,
            verification_records: domain
                .verification
                .into_iter()
                .map(|v| VerificationRecord {
                    record_type: v.record_type,
                    name: v.domain,
                    value: v.value,
                })
                .collect(),
            already_exists,
        }
    }

    async fn get_domain(&self, domain: &str) -> Result<VercelDomain> {
        self.get(&self.domain_path(domain)?, ErrorContext::for_domain(domain))
            .await
    }
}

#[async_trait]
impl HostingPlatform for VercelPlatform {
    fn id(&self) -> &'static str {
        "vercel"
    }

    async fn add_domain(&self, domain: &str) -> Result<DomainAddition> {
        let domain = normalize_domain_name(domain);
        let path = format!(
            "/v10/projects/{}/domains",
            urlencoding::encode(self.project()?)
        );
        let body = AddDomainBody { name: &domain };

        match self
            .post::<VercelDomain, _>(&path, Some(&body), ErrorContext::for_domain(&domain))
            .await
        {
            Ok(added) => {
                log::info!(
                    "[vercel] Added {domain} (verified={}, {} verification record(s))",
                    added.verified,
                    added.verification.len()
                );
                Ok(Self::to_addition(added, false))
            }
            Err(conflict @ ProviderError::AlreadyExists { .. }) => {
                // 已挂在本项目上则复用；挂在其他项目上则保留冲突错误
                match self.get_domain(&domain).await {
                    Ok(existing) => {
                        log::info!("[vercel] {domain} is already on the project, reusing it");
                        Ok(Self::to_addition(existing, true))
                    }
                    Err(_) => Err(conflict),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn check_verified(&self, domain: &str) -> Result<bool> {
        let domain = normalize_domain_name(domain);
        if self.get_domain(&domain).await?.verified {
            return Ok(true);
        }

        let path = format!("{}/verify", self.domain_path(&domain)?);
        match self
            .post::<VercelDomain, ()>(&path, None, ErrorContext::for_domain(&domain))
            .await
        {
            Ok(d) => Ok(d.verified),
            Err(ProviderError::InvalidParameter { param, detail, .. }) if param == "verification" => {
                log::debug!("[vercel] {domain} not verified yet: {detail}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn remove_domain(&self, domain: &str) -> Result<()> {
        let domain = normalize_domain_name(domain);
        self.delete(&self.domain_path(&domain)?, ErrorContext::for_domain(&domain))
            .await?;
        log::info!("[vercel] Removed {domain} from the project");
        Ok(())
    }

    async fn create_project(
        &self,
        name: &str,
        repository: Option<&str>,
    ) -> Result<HostingProject> {
        let body = CreateProjectBody {
            name,
            git_repository: repository.map(|repo| GitRepositoryRef {
                provider: "github",
                repo,
            }),
        };
        let ctx = ErrorContext {
            resource: Some(name.to_string()),
            ..ErrorContext::default()
        };

        let project: VercelProject = match self.post("/v10/projects", Some(&body), ctx).await {
            Ok(p) => p,
            Err(conflict @ ProviderError::AlreadyExists { .. }) => {
                let path = format!("/v9/projects/{}", urlencoding::encode(name));
                let ctx = ErrorContext {
                    resource: Some(name.to_string()),
                    ..ErrorContext::default()
                };
                match self.get::<VercelProject>(&path, ctx).await {
                    Ok(p) => {
                        log::info!("[vercel] Project {name} already exists ({}), reusing it", p.id);
                        p
                    }
                    Err(_) => return Err(conflict),
                }
            }
            Err(e) => return Err(e),
        };

        log::info!("[vercel] Project {} is {}", project.name, project.id);
        Ok(HostingProject {
            id: project.id,
            name: project.name,
        })
    }
}
