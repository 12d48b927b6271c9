//! Cloudflare HTTP 请求方法（使用通用 HTTP 工具）

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 执行请求并解包 `result` 字段
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = format!("{CF_API_BASE}{path}");
        let method_name = method.to_string();

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            log::debug!("Request Body: {}", HttpUtils::body_for_log(body));
            request = request.json(body);
        }

        let (_status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), &method_name, &url).await?;

        // Cloudflare 的 4xx 响应体同样是标准信封，统一按 success 字段判断
        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        if !cf_response.success {
            let (code, message) = cf_response
                .errors
                .and_then(|errors| {
                    errors
                        .into_iter()
                        .next()
                        .map(|e| (e.code.to_string(), e.message))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            let err = self.map_error(RawApiError::with_code(code, message), ctx);
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, ctx: ErrorContext) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None, ctx).await
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body), ctx).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.request::<serde_json::Value, ()>(Method::DELETE, path, None, ctx)
            .await
            .map(|_| ())
    }
}
