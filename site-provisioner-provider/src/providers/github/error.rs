//! GitHub error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::GithubSourceHost;

const UNKNOWN: &str = "<unknown>";

/// GitHub error mapping, keyed by HTTP status
/// Reference: <https://docs.github.com/en/rest/using-the-rest-api/troubleshooting-the-rest-api>
impl ProviderErrorMapper for GithubSourceHost {
    fn provider_name(&self) -> &'static str {
        "github"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Bad credentials
            Some("401") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Missing scope, SSO enforcement, or not an org member
            Some("403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("404") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.resource.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // Validation failed: "name already exists on this account" is the conflict case
            Some("422") if raw.message.contains("already exists") => {
                ProviderError::AlreadyExists {
                    provider: self.provider_name().to_string(),
                    resource: context.resource.unwrap_or_else(|| UNKNOWN.to_string()),
                    raw_message: Some(raw.message),
                }
            }
            Some("422" | "400") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "name".to_string(),
                detail: raw.message,
            },

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}
