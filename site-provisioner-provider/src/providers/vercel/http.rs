//! Vercel HTTP 请求方法（使用通用 HTTP 工具）

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{VERCEL_API_BASE, VercelErrorBody, VercelPlatform};

impl VercelPlatform {
    /// Full URL for `path`, scoped to the team when one is configured.
    pub(crate) fn url(&self, path: &str) -> String {
        match &self.team_id {
            Some(team) => {
                let sep = if path.contains('?') { '&' } else { '?' };
                format!(
                    "{VERCEL_API_BASE}{path}{sep}teamId={}",
                    urlencoding::encode(team)
                )
            }
            None => format!("{VERCEL_API_BASE}{path}"),
        }
    }

    /// 执行请求，返回成功响应的原始文本
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let url = self.url(path);
        let method_name = method.to_string();

        let mut request = self.client.request(method, &url).bearer_auth(&self.token);
        if let Some(body) = body {
            log::debug!("Request Body: {}", HttpUtils::body_for_log(body));
            request = request.json(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), &method_name, &url).await?;

        if status >= 400 {
            let raw = serde_json::from_str::<VercelErrorBody>(&response_text).map_or_else(
                |_| RawApiError::with_code(status.to_string(), format!("HTTP {status}")),
                |body| {
                    RawApiError::with_code(
                        body.error.code.unwrap_or_else(|| status.to_string()),
                        body.error.message,
                    )
                },
            );
            let err = self.map_error(raw, ctx);
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        Ok(response_text)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, ctx: ErrorContext) -> Result<T> {
        let text = self.send::<()>(Method::GET, path, None, ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self.send(Method::POST, path, body, ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 DELETE 请求（响应体忽略）
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None, ctx)
            .await
            .map(|_| ())
    }
}
