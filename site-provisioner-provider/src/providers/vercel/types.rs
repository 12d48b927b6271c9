//! Vercel API 类型定义

use serde::{Deserialize, Serialize};

/// Error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct VercelErrorBody {
    pub error: VercelError,
}

#[derive(Debug, Deserialize)]
pub struct VercelError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Project domain as returned by the `/projects/{id}/domains` endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VercelDomain {
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub verification: Vec<VercelVerification>,
}

/// Ownership challenge: `type` is the record type, `domain` the FQDN to create it at.
#[derive(Debug, Deserialize)]
pub struct VercelVerification {
    #[serde(rename = "type")]
    pub record_type: String,
    pub domain: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct VercelProject {
    pub id: String,
    pub name: String,
}

/// `POST /v10/projects/{id}/domains` 请求体
#[derive(Debug, Serialize)]
pub struct AddDomainBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GitRepositoryRef<'a> {
    #[serde(rename = "type")]
    pub provider: &'static str,
    pub repo: &'a str,
}

/// `POST /v10/projects` 请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositoryRef<'a>>,
}
