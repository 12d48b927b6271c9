//! Site bootstrap: source repository plus hosting project
//!
//! Runs before provisioning, when the site has no repository or project yet. Both calls are
//! reuse-or-create, so running it again for the same name is harmless.

use std::sync::Arc;

use serde::Serialize;
use site_provisioner_provider::{CreateRepositoryRequest, HostingProject, Repository};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Repository names GitHub accepts.
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapOutcome {
    pub repository: Repository,
    pub project: HostingProject,
    /// `false` when an existing repository was reused.
    pub repository_created: bool,
}

pub struct SiteBootstrapService {
    ctx: Arc<ServiceContext>,
}

impl SiteBootstrapService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    fn validate_name(name: &str) -> CoreResult<()> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "site name must be 1-{MAX_NAME_LEN} characters"
            )));
        }
        if name.starts_with('.') {
            return Err(CoreError::Validation(format!(
                "site name '{name}' must not start with a dot"
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(CoreError::Validation(format!(
                "site name '{name}' may only contain letters, digits, '-', '_' and '.'"
            )));
        }
        Ok(())
    }

    /// Ensures a repository named `name` exists and creates a hosting project linked to it.
    pub async fn bootstrap(&self, name: &str, private: bool) -> CoreResult<BootstrapOutcome> {
        Self::validate_name(name)?;
        let source_host = self.ctx.source_host()?;

        let existing = source_host
            .get_repository(name)
            .await
            .map_err(|e| self.ctx.provider_error("Repository lookup", e))?;

        let (repository, repository_created) = match existing {
            Some(repo) => {
                log::info!("Reusing repository {}", repo.full_name);
                (repo, false)
            }
            None => {
                let req = CreateRepositoryRequest {
                    name: name.to_string(),
                    description: Some(format!("Source of the {name} website")),
                    private,
                    auto_init: true,
                };
                let repo = source_host
                    .create_repository(&req)
                    .await
                    .map_err(|e| self.ctx.provider_error("Repository creation", e))?;
                log::info!("Created repository {}", repo.full_name);
                (repo, true)
            }
        };

        let project = self
            .ctx
            .hosting
            .create_project(name, Some(&repository.full_name))
            .await
            .map_err(|e| self.ctx.provider_error("Project creation", e))?;
        log::info!("Hosting project {} ({}) linked to {}", project.name, project.id, repository.full_name);

        Ok(BootstrapOutcome {
            repository,
            project,
            repository_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestHarness;

    #[tokio::test]
    async fn creates_repository_and_linked_project() {
        let harness = TestHarness::new();
        let service = SiteBootstrapService::new(harness.context());

        let outcome = service.bootstrap("my-site", true).await.unwrap();

        assert!(outcome.repository_created);
        assert_eq!(outcome.repository.full_name, "acme/my-site");
        assert!(outcome.repository.private);
        assert_eq!(outcome.project.name, "my-site");
        assert_eq!(
            harness.hosting.projects().await,
            vec![("my-site".to_string(), Some("acme/my-site".to_string()))]
        );
    }

    #[tokio::test]
    async fn reuses_existing_repository() {
        let harness = TestHarness::new();
        harness.source_host.add_repository("my-site").await;
        let service = SiteBootstrapService::new(harness.context());

        let outcome = service.bootstrap("my-site", false).await.unwrap();

        assert!(!outcome.repository_created);
        assert_eq!(harness.source_host.created().await.len(), 0);
        assert_eq!(harness.hosting.projects().await.len(), 1);
    }

    #[tokio::test]
    async fn requires_a_source_host() {
        let harness = TestHarness::new();
        let service = SiteBootstrapService::new(harness.context_without_source_host());

        let err = service.bootstrap("my-site", false).await.unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.contains("github")));
    }

    #[test]
    fn validates_names() {
        assert!(SiteBootstrapService::validate_name("my.site_v2").is_ok());
        assert!(SiteBootstrapService::validate_name("").is_err());
        assert!(SiteBootstrapService::validate_name(".hidden").is_err());
        assert!(SiteBootstrapService::validate_name("has space").is_err());
        assert!(SiteBootstrapService::validate_name(&"a".repeat(101)).is_err());
    }
}
