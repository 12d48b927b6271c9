//! Shared HTTP plumbing for the adapters
//!
//! Each adapter builds its own `RequestBuilder` (bearer token, form body with an API key) and
//! hands it to [`HttpUtils::execute_request`], which sends it once, logs it, and turns the
//! statuses every API treats the same way into [`ProviderError`]s. Anything else is returned
//! as `(status, body)` for the adapter's own error mapping.
//!
//! Nothing here retries. Registrar purchases are not idempotent, so whether a call may be
//! repeated is decided by the caller.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// `Retry-After` in seconds. The HTTP-date form is ignored.
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Statuses with the same meaning for every provider: 429 and the 502-504 gateway family.
/// `None` hands the response back to the adapter.
fn transient_status(
    provider: &str,
    status: u16,
    retry_after: Option<u64>,
    body: &str,
) -> Option<ProviderError> {
    match status {
        429 => Some(ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after,
            raw_message: (!body.is_empty()).then(|| truncate_for_log(body)),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("HTTP {status}: {}", truncate_for_log(body)),
        }),
        _ => None,
    }
}

fn transport_error(provider: &str, err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: err.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: err.to_string(),
        }
    }
}

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// Sends `request` once and returns `(status, body)`.
    ///
    /// `target` is logged, so it must be a path or command name, never a URL carrying a key.
    /// Transport failures become `Timeout`/`NetworkError`; 429 becomes `RateLimited`;
    /// 502/503/504 become `NetworkError`.
    pub async fn execute_request(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        target: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider}] {method} {target}");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, &e))?;

        let status = response.status().as_u16();
        let retry_after = retry_after_secs(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{provider}] {method} {target} -> {status}: {}", truncate_for_log(&body));

        if let Some(err) = transient_status(provider, status, retry_after, &body) {
            log::warn!("[{provider}] {method} {target}: {err}");
            return Err(err);
        }
        Ok((status, body))
    }

    /// 解析 JSON 响应
    pub fn parse_json<T>(body: &str, provider: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider}] Unexpected response shape ({e}): {}", truncate_for_log(body));
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Request body as truncated JSON, for debug logs.
    pub fn body_for_log<B: serde::Serialize>(body: &B) -> String {
        serde_json::to_string(body).map_or_else(
            |_| "<unserializable body>".to_string(),
            |json| truncate_for_log(&json),
        )
    }
}
