//! GitHub HTTP 请求方法（使用通用 HTTP 工具）

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{GITHUB_API_BASE, GithubErrorBody, GithubSourceHost};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

impl GithubSourceHost {
    /// 执行请求并解析 JSON 响应
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
        let url = format!("{GITHUB_API_BASE}{path}");
        let method_name = method.to_string();

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(body) = body {
            log::debug!("Request Body: {}", HttpUtils::body_for_log(body));
            request = request.json(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), &method_name, &url).await?;

        if status >= 400 {
            // GitHub 错误没有业务码，以 HTTP 状态码作为错误码
            let message = serde_json::from_str::<GithubErrorBody>(&response_text)
                .map_or_else(|_| format!("HTTP {status}"), |b| b.full_message());
            let err = self.map_error(RawApiError::with_code(status.to_string(), message), ctx);
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        HttpUtils::parse_json(&response_text, self.provider_name())
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
}
