//! GitHub source host

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::config::GithubConfig;
use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{GithubErrorBody, GithubRepository, GithubUser};

pub(crate) const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub source host implementation.
///
/// Repositories live under the configured organization, or under the token's own account
/// when no organization is set.
pub struct GithubSourceHost {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) organization: Option<String>,
}

impl GithubSourceHost {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client("github")?,
            token: config.token.clone(),
            organization: config.organization.clone(),
        })
    }
}
