//! GitHub REST API 类型定义

use serde::{Deserialize, Serialize};

/// Error body: `{"message": "...", "errors": [{"message": "..."}]}`
#[derive(Debug, Deserialize)]
pub struct GithubErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GithubErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct GithubErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl GithubErrorBody {
    /// Top-level message followed by the first detail, if any.
    pub fn full_message(&self) -> String {
        match self.errors.iter().find_map(|e| e.message.as_deref()) {
            Some(detail) => format!("{}: {detail}", self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GithubRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
    pub private: bool,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// `POST /user/repos` / `POST /orgs/{org}/repos` 请求体
#[derive(Debug, Serialize)]
pub struct CreateRepoBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub private: bool,
    pub auto_init: bool,
}
