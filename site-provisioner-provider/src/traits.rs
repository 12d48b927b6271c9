use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    BatchCreateFailure, BatchCreateResult, CreateRepositoryRequest, DnsRecord, DomainAddition,
    DomainAvailability, HostingProject, PurchaseReceipt, Repository, ZoneCreation, ZoneStatus,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 资源名称（域名、记录名、仓库名），用于 `AlreadyExists` 等错误
    pub resource: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// 域名（用于 `DomainNotFound` / `DomainUnavailable` 等错误）
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn for_domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            resource: Some(domain.to_string()),
            ..Self::default()
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Domain registrar.
///
/// `purchase` is a real-money, irreversible transaction; there is deliberately no operation
/// to undo it.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Whether the domain can be registered, and at what price if premium.
    async fn check_availability(&self, domain: &str) -> Result<DomainAvailability>;

    /// Registers the domain for `years`, optionally with WHOIS privacy.
    async fn purchase(&self, domain: &str, years: u32, whois_guard: bool)
    -> Result<PurchaseReceipt>;

    /// Points the domain at custom nameservers.
    async fn delegate_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()>;
}

/// DNS 提供商 Trait
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Creates the zone for `domain`.
    ///
    /// A zone that already exists is not an error: implementations fetch it and return it with
    /// `already_exists = true`, so calling this twice yields the same zone id.
    async fn create_zone(&self, domain: &str) -> Result<ZoneCreation>;

    /// 创建 DNS 记录，返回记录 ID
    async fn create_record(&self, zone_id: &str, record: &DnsRecord) -> Result<String>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// Current zone status, or `None` when the zone does not exist.
    async fn get_zone_status(&self, zone_id: &str) -> Result<Option<ZoneStatus>>;

    /// 批量创建 DNS 记录
    ///
    /// Issues `create_record()` one record at a time, in order. A failure does not stop the
    /// batch, and every id created before or after it is kept, so the caller can compensate
    /// exactly what exists.
    async fn create_records(
        &self,
        zone_id: &str,
        records: &[DnsRecord],
    ) -> Result<BatchCreateResult> {
        let mut result = BatchCreateResult::default();

        for (i, record) in records.iter().enumerate() {
            match self.create_record(zone_id, record).await {
                Ok(id) => result.created_ids.push(id),
                Err(e) => {
                    log::warn!("[{}] Failed to create {}: {e}", self.id(), record.label());
                    result.failures.push(BatchCreateFailure {
                        request_index: i,
                        record_type: record.record_type,
                        record_name: record.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }
}

/// Hosting platform the domain is served from.
#[async_trait]
pub trait HostingPlatform: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Attaches the domain to the configured project.
    async fn add_domain(&self, domain: &str) -> Result<DomainAddition>;

    /// Whether the platform considers the domain verified. Implementations may trigger a
    /// re-verification as part of the check.
    async fn check_verified(&self, domain: &str) -> Result<bool>;

    /// Detaches the domain from the project.
    async fn remove_domain(&self, domain: &str) -> Result<()>;

    /// Creates a project, optionally linked to a source repository (`owner/name`).
    async fn create_project(&self, name: &str, repository: Option<&str>)
    -> Result<HostingProject>;
}

/// Source-control host holding the site's repository.
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// The repository named `name` under the configured owner, if it exists.
    async fn get_repository(&self, name: &str) -> Result<Option<Repository>>;

    async fn create_repository(&self, req: &CreateRepositoryRequest) -> Result<Repository>;
}
