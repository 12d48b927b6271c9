//! Vercel error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::VercelPlatform;

const UNKNOWN: &str = "<unknown>";

/// Vercel error code mapping
///
/// Vercel reports string codes in the error envelope; when the body carries none, the HTTP
/// status is used as the code.
impl ProviderErrorMapper for VercelPlatform {
    fn provider_name(&self) -> &'static str {
        "vercel"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication error
            Some("invalid_token" | "not_authorized" | "missing_token" | "401") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // Token has no access to the team or project
            Some("forbidden" | "team_unauthorized" | "403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Domain or project already exists
            Some(
                "domain_already_in_use"
                | "domain_already_exists"
                | "project_domain_already_exists"
                | "conflict"
                | "409",
            ) => ProviderError::AlreadyExists {
                provider: self.provider_name().to_string(),
                resource: context
                    .resource
                    .or(context.domain)
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // Ownership proof missing: the domain is not verified yet
            Some(
                "missing_txt_record"
                | "invalid_txt_record"
                | "domain_not_verified"
                | "verification_failed",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "verification".to_string(),
                detail: raw.message,
            },

            // Project or domain not found
            Some("not_found" | "404") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context
                    .domain
                    .or(context.resource)
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // Invalid parameter
            Some("bad_request" | "invalid_name" | "invalid_domain" | "400") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "name".to_string(),
                    detail: raw.message,
                }
            }

            // Plan limits
            Some("domain_limit_reached" | "too_many_projects" | "limit_reached") => {
                ProviderError::QuotaExceeded {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}
