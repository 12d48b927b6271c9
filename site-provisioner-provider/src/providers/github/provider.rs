//! GitHub SourceHost trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, SourceHost};
use crate::types::{CreateRepositoryRequest, Repository};

use super::types::CreateRepoBody;
use super::{GithubRepository, GithubSourceHost, GithubUser};

const DEFAULT_BRANCH: &str = "main";

impl GithubSourceHost {
    /// Configured organization, or the login of the token's user.
    async fn owner(&self) -> Result<String> {
        if let Some(org) = self.organization.as_deref().filter(|o| !o.is_empty()) {
            return Ok(org.to_string());
        }
        let user: GithubUser = self.get("/user", ErrorContext::default()).await?;
        Ok(user.login)
    }

    pub(crate) fn to_repository(repo: GithubRepository) -> Repository {
        Repository {
            name: repo.name,
            full_name: repo.full_name,
            html_url: repo.html_url,
            clone_url: repo.clone_url,
            private: repo.private,
            default_branch: repo
                .default_branch
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        }
    }

    fn create_path(&self) -> String {
        match self.organization.as_deref().filter(|o| !o.is_empty()) {
            Some(org) => format!("/orgs/{}/repos", urlencoding::encode(org)),
            None => "/user/repos".to_string(),
        }
    }
}

#[async_trait]
impl SourceHost for GithubSourceHost {
    fn id(&self) -> &'static str {
        "github"
    }

    async fn get_repository(&self, name: &str) -> Result<Option<Repository>> {
        let owner = self.owner().await?;
        let path = format!(
            "/repos/{}/{}",
            urlencoding::encode(&owner),
            urlencoding::encode(name)
        );
        let ctx = ErrorContext {
            resource: Some(format!("{owner}/{name}")),
            ..ErrorContext::default()
        };

        match self.get::<GithubRepository>(&path, ctx).await {
            Ok(repo) => Ok(Some(Self::to_repository(repo))),
            Err(ProviderError::DomainNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_repository(&self, req: &CreateRepositoryRequest) -> Result<Repository> {
        let body = CreateRepoBody {
            name: &req.name,
            description: req.description.as_deref(),
            private: req.private,
            auto_init: req.auto_init,
        };
        let ctx = ErrorContext {
            resource: Some(req.name.clone()),
            ..ErrorContext::default()
        };

        let repo: GithubRepository = self.post(&self.create_path(), &body, ctx).await?;
        log::info!("[github] Created repository {}", repo.full_name);
        Ok(Self::to_repository(repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GithubConfig;

    #[test]
    fn create_path_for_org_and_user() {
        let org = GithubSourceHost::new(&GithubConfig {
            token: "t".to_string(),
            organization: Some("acme".to_string()),
        })
        .unwrap();
        assert_eq!(org.create_path(), "/orgs/acme/repos");

        let user = GithubSourceHost::new(&GithubConfig::default()).unwrap();
        assert_eq!(user.create_path(), "/user/repos");
    }

    #[test]
    fn repository_defaults_branch() {
        let repo: GithubRepository = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "site",
                "full_name": "acme/site",
                "html_url": "https://github.com/acme/site",
                "clone_url": "https://github.com/acme/site.git",
                "private": true
            }"#,
        )
        .unwrap();
        let repo = GithubSourceHost::to_repository(repo);
        assert_eq!(repo.full_name, "acme/site");
        assert_eq!(repo.default_branch, "main");
        assert!(repo.private);
    }

    #[test]
    fn create_body_omits_missing_description() {
        let body = CreateRepoBody {
            name: "site",
            description: None,
            private: false,
            auto_init: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["auto_init"], true);
    }
}
