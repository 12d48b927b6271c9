//! Adapter configuration.
//!
//! These structs are constructed once (usually by the core configuration loader) and passed by
//! reference into the adapter constructors. Adapters copy what they need; nothing here is
//! read as ambient global state.

use serde::{Deserialize, Serialize};

/// Namecheap API access and the registrant contact used for new registrations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamecheapConfig {
    pub api_user: String,
    pub api_key: String,
    /// Account the API acts on. Defaults to `api_user` when empty.
    pub username: String,
    /// Whitelisted client IP required by every Namecheap call.
    pub client_ip: String,
    /// Use `api.sandbox.namecheap.com` instead of the production endpoint.
    pub sandbox: bool,
    pub registrant: RegistrantContact,
}

impl NamecheapConfig {
    pub(crate) fn effective_username(&self) -> &str {
        if self.username.is_empty() {
            &self.api_user
        } else {
            &self.username
        }
    }
}

/// Contact details submitted as registrant, tech, admin and billing contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrantContact {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    pub address1: String,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    /// Two-letter country code.
    pub country: String,
    /// Phone in `+NNN.NNNNNNNNNN` format.
    pub phone: String,
    pub email_address: String,
}

impl RegistrantContact {
    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address1", &self.address1),
            ("city", &self.city),
            ("stateProvince", &self.state_province),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
            ("phone", &self.phone),
            ("emailAddress", &self.email_address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Cloudflare API token and the account new zones are created in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudflareConfig {
    pub api_token: String,
    pub account_id: String,
}

/// Vercel API token and the project domains are attached to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VercelConfig {
    pub token: String,
    /// Project id or name. Optional only for the bootstrap flow, which creates the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// GitHub token and the owner new repositories are created under.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GithubConfig {
    pub token: String,
    /// Organization to create repositories in. `None` creates them for the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}
