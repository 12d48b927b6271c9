//! Namecheap HTTP 请求方法（使用通用 HTTP 工具）

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NamecheapRegistrar;
use super::xml;

impl NamecheapRegistrar {
    /// Global parameters followed by the command's own parameters, form-encoded.
    pub(crate) fn form_body(&self, command: &str, params: &[(&str, String)]) -> String {
        let global = [
            ("ApiUser", self.api_user.as_str()),
            ("ApiKey", self.api_key.as_str()),
            ("UserName", self.username.as_str()),
            ("ClientIp", self.client_ip.as_str()),
            ("Command", command),
        ];

        global
            .into_iter()
            .chain(params.iter().map(|(k, v)| (*k, v.as_str())))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Executes a command and returns the raw XML of a successful response.
    ///
    /// Parameters travel in the POST body, so the API key never appears in logged URLs.
    pub(crate) async fn execute(
        &self,
        command: &str,
        params: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<String> {
        let request = self
            .client
            .post(self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(self.form_body(command, params));

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", command).await?;

        match xml::response_status(&response_text).as_deref() {
            Some(s) if s.eq_ignore_ascii_case("OK") => Ok(response_text),
            Some(_) => {
                let raw = xml::errors(&response_text)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| RawApiError::new("Unknown error"));
                let err = self.map_error(raw, ctx);
                if err.is_expected() {
                    log::warn!("API error ({command}): {err}");
                } else {
                    log::error!("API error ({command}): {err}");
                }
                Err(err)
            }
            None => Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: response is not a Namecheap API document"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::NamecheapConfig;

    use super::*;

    #[test]
    fn form_body_encodes_globals_then_params() {
        let registrar = NamecheapRegistrar::new(&NamecheapConfig {
            api_user: "alice".to_string(),
            api_key: "k&y".to_string(),
            client_ip: "203.0.113.7".to_string(),
            ..NamecheapConfig::default()
        })
        .unwrap();

        let body = registrar.form_body(
            "namecheap.domains.check",
            &[("DomainList", "example.com".to_string())],
        );

        assert_eq!(
            body,
            "ApiUser=alice&ApiKey=k%26y&UserName=alice&ClientIp=203.0.113.7\
             &Command=namecheap.domains.check&DomainList=example.com"
        );
    }
}
