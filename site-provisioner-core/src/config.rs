//! Provisioner configuration
//!
//! Loaded once at startup: a JSON file, then environment overrides for secrets, then
//! [`ProvisionerConfig::validate`]. The resulting struct is passed by reference into the adapter
//! constructors and the saga; nothing reads it as global state.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use site_provisioner_provider::log_sanitizer::mask_secret;
use site_provisioner_provider::{
    CloudflareConfig, DnsRecord, DnsRecordType, GithubConfig, NamecheapConfig, VercelConfig,
};

use crate::error::{CoreError, CoreResult};
use crate::poll::PollSettings;
use crate::retry::RetryPolicy;

/// Directory under the platform config dir.
const APP_DIR: &str = "site-provisioner";
const CONFIG_FILE: &str = "config.json";

/// Records pointing the apex and `www` at Vercel's edge.
fn default_hosting_target() -> Vec<DnsRecord> {
    vec![
        DnsRecord::new(DnsRecordType::A, "@", "76.76.21.21"),
        DnsRecord::new(DnsRecordType::Cname, "www", "cname.vercel-dns.com"),
    ]
}

/// Saga tuning: retry budget for nameserver delegation, verification polling, and the records
/// published in step 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSettings {
    #[serde(default)]
    pub nameserver_retry: RetryPolicy,
    #[serde(default)]
    pub verification_poll: PollSettings,
    #[serde(default = "default_hosting_target")]
    pub hosting_target: Vec<DnsRecord>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            nameserver_retry: RetryPolicy::default(),
            verification_poll: PollSettings::default(),
            hosting_target: default_hosting_target(),
        }
    }
}

/// Full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionerConfig {
    #[serde(default)]
    pub namecheap: NamecheapConfig,
    #[serde(default)]
    pub cloudflare: CloudflareConfig,
    #[serde(default)]
    pub vercel: VercelConfig,
    /// Only needed by `bootstrap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubConfig>,
    #[serde(default)]
    pub workflow: WorkflowSettings,
}

impl ProvisionerConfig {
    /// `<config dir>/site-provisioner/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads and parses a config file. No environment overrides, no validation.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Io(format!("Failed to read config {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CoreError::Serialization(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Loads `path` (or the default path), applies environment overrides, validates.
    ///
    /// A missing file is only an error when `path` was given explicitly; otherwise the
    /// configuration comes from the environment alone.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(p) => {
                    log::debug!("Loading config from {}", p.display());
                    Self::from_file(&p)?
                }
                None => {
                    log::debug!("No config file found, using environment only");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        log::info!("Configuration loaded: {}", config.redacted_summary());
        Ok(config)
    }

    /// Overrides secrets and ids from environment variables. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("NAMECHEAP_API_USER") {
            self.namecheap.api_user = v;
        }
        if let Some(v) = get("NAMECHEAP_API_KEY") {
            self.namecheap.api_key = v;
        }
        if let Some(v) = get("NAMECHEAP_CLIENT_IP") {
            self.namecheap.client_ip = v;
        }
        if let Some(v) = get("CLOUDFLARE_API_TOKEN") {
            self.cloudflare.api_token = v;
        }
        if let Some(v) = get("CLOUDFLARE_ACCOUNT_ID") {
            self.cloudflare.account_id = v;
        }
        if let Some(v) = get("VERCEL_TOKEN") {
            self.vercel.token = v;
        }
        if let Some(v) = get("VERCEL_PROJECT_ID") {
            self.vercel.project_id = Some(v);
        }
        if let Some(v) = get("VERCEL_TEAM_ID") {
            self.vercel.team_id = Some(v);
        }
        if let Some(v) = get("GITHUB_TOKEN") {
            self.github.get_or_insert_with(GithubConfig::default).token = v;
        }
    }

    /// Checks every credential the provisioning workflow needs, naming the first missing field.
    ///
    /// The Vercel project id and GitHub section are not required here: `bootstrap` creates the
    /// project, and only `bootstrap` talks to GitHub.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("namecheap.apiUser", &self.namecheap.api_user),
            ("namecheap.apiKey", &self.namecheap.api_key),
            ("namecheap.clientIp", &self.namecheap.client_ip),
            ("cloudflare.apiToken", &self.cloudflare.api_token),
            ("cloudflare.accountId", &self.cloudflare.account_id),
            ("vercel.token", &self.vercel.token),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CoreError::Config(format!("{field} is not set")));
        }

        self.workflow
            .nameserver_retry
            .validate()
            .map_err(|e| CoreError::Config(format!("workflow.nameserverRetry: {e}")))?;
        if self.workflow.hosting_target.is_empty() {
            return Err(CoreError::Config(
                "workflow.hostingTarget must contain at least one record".to_string(),
            ));
        }
        Ok(())
    }

    /// Fields `provision` needs beyond [`validate`](Self::validate).
    pub fn require_project(&self) -> CoreResult<&str> {
        self.vercel
            .project_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                CoreError::Config(
                    "vercel.projectId is not set (run `bootstrap` first or set VERCEL_PROJECT_ID)"
                        .to_string(),
                )
            })
    }

    /// The GitHub section, required by `bootstrap`.
    pub fn require_github(&self) -> CoreResult<&GithubConfig> {
        self.github
            .as_ref()
            .filter(|g| !g.token.trim().is_empty())
            .ok_or_else(|| CoreError::Config("github.token is not set".to_string()))
    }

    /// One-line description with every secret masked.
    pub fn redacted_summary(&self) -> String {
        format!(
            "namecheap(user={}, key={}, sandbox={}) cloudflare(token={}, account={}) vercel(token={}, project={}) github({})",
            self.namecheap.api_user,
            mask_secret(&self.namecheap.api_key),
            self.namecheap.sandbox,
            mask_secret(&self.cloudflare.api_token),
            self.cloudflare.account_id,
            mask_secret(&self.vercel.token),
            self.vercel.project_id.as_deref().unwrap_or("<unset>"),
            self.github
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |g| mask_secret(&g.token)),
        )
    }
}
