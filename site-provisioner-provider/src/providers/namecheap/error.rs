//! Namecheap error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NamecheapRegistrar;

const UNKNOWN: &str = "<unknown>";

/// Namecheap error number mapping
/// Reference: <https://www.namecheap.com/support/api/error-codes/>
impl ProviderErrorMapper for NamecheapRegistrar {
    fn provider_name(&self) -> &'static str {
        "namecheap"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication error
            // 1010101: Parameter APIUser is missing
            // 1010102: Parameter APIKey is missing
            // 1011102: API Key is invalid or API access has not been enabled
            // 1011150: Parameter RequestIP is invalid (client IP not whitelisted)
            // 1017150: Parameter RequestIP is disabled or locked
            Some("1010101" | "1010102" | "1011102" | "1011150" | "1017150") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // Domain is not in the account
            // 2019166: Domain not found
            // 2016166: Domain is not associated with your account
            Some("2019166" | "2016166") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // Domain name is malformed or the TLD is not supported
            // 2011280: TLD is not supported
            // 2030166: Domain is invalid
            // 2030280: TLD is not supported in API
            Some("2011280" | "2030166" | "2030280") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "domain".to_string(),
                detail: raw.message,
            },

            // Insufficient funds
            // 2528166: Order creation failed (balance)
            // 4022337: Error in connecting to payment gateway / insufficient balance
            Some("2528166" | "4022337") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Domain cannot be registered
            // 3019166 / 4019166: Domain not available
            // 4011103: DomainName not Available / UserName not available
            Some("3019166" | "4019166" | "4011103") => ProviderError::DomainUnavailable {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // 2015xxx: a required contact parameter is missing or invalid
            Some(code) if code.starts_with("2015") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "registrant".to_string(),
                detail: raw.message,
            },

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}
