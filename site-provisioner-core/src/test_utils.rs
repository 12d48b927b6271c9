//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use site_provisioner_provider::{
    CreateRepositoryRequest, DnsProvider, DnsRecord, DomainAddition, DomainAvailability,
    HostingPlatform, HostingProject, ProviderError, PurchaseReceipt, Registrar, Repository,
    Result, SourceHost, VerificationRecord, ZoneCreation, ZoneState, ZoneStatus,
};
use tokio::sync::RwLock;

use crate::services::ServiceContext;

pub fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection reset".to_string(),
    }
}

// ===== MockRegistrar =====

pub struct MockRegistrar {
    available: RwLock<bool>,
    check_error: RwLock<Option<ProviderError>>,
    purchase_error: RwLock<Option<ProviderError>>,
    /// 接下来 N 次 delegate 调用返回网络错误
    delegation_failures: RwLock<u32>,
    delegation_error: RwLock<Option<ProviderError>>,
    calls: RwLock<Vec<String>>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self {
            available: RwLock::new(true),
            check_error: RwLock::new(None),
            purchase_error: RwLock::new(None),
            delegation_failures: RwLock::new(0),
            delegation_error: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    pub async fn fail_check(&self, err: ProviderError) {
        *self.check_error.write().await = Some(err);
    }

    pub async fn fail_purchase(&self, err: ProviderError) {
        *self.purchase_error.write().await = Some(err);
    }

    pub async fn fail_next_delegations(&self, count: u32) {
        *self.delegation_failures.write().await = count;
    }

    /// 每次 delegate 调用都返回 `err`
    pub async fn fail_delegations_with(&self, err: ProviderError) {
        *self.delegation_error.write().await = Some(err);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl Registrar for MockRegistrar {
    fn id(&self) -> &'static str {
        "mock-registrar"
    }

    async fn check_availability(&self, domain: &str) -> Result<DomainAvailability> {
        self.calls.write().await.push(format!("check {domain}"));
        if let Some(err) = self.check_error.read().await.clone() {
            return Err(err);
        }
        Ok(DomainAvailability {
            domain: domain.to_string(),
            available: *self.available.read().await,
            is_premium: false,
            price: None,
        })
    }

    async fn purchase(
        &self,
        domain: &str,
        years: u32,
        whois_guard: bool,
    ) -> Result<PurchaseReceipt> {
        self.calls
            .write()
            .await
            .push(format!("purchase {domain} years={years} whois={whois_guard}"));
        if let Some(err) = self.purchase_error.read().await.clone() {
            return Err(err);
        }
        Ok(PurchaseReceipt {
            domain_id: Some("D1".to_string()),
            transaction_id: Some("T1".to_string()),
            charged_amount: Some(9.58),
        })
    }

    async fn delegate_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        self.calls
            .write()
            .await
            .push(format!("delegate {domain} {}", nameservers.join(",")));
        if let Some(err) = self.delegation_error.read().await.clone() {
            return Err(err);
        }
        let mut remaining = self.delegation_failures.write().await;
        if *remaining > 0 {
            *remaining -= 1;
            return Err(network_error());
        }
        Ok(())
    }
}

// ===== MockDnsProvider =====

pub struct MockDnsProvider {
    zone_error: RwLock<Option<ProviderError>>,
    zones: RwLock<HashMap<String, String>>,
    records: RwLock<Vec<(String, DnsRecord)>>,
    next_record: RwLock<u32>,
    /// 这些名称的记录创建失败
    failing_names: RwLock<Vec<String>>,
    /// 这些 ID 的记录删除失败
    undeletable: RwLock<Vec<String>>,
    deleted: RwLock<Vec<String>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            zone_error: RwLock::new(None),
            zones: RwLock::new(HashMap::new()),
            records: RwLock::new(Vec::new()),
            next_record: RwLock::new(1),
            failing_names: RwLock::new(Vec::new()),
            undeletable: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
        }
    }

    pub async fn fail_zone_creation(&self, err: ProviderError) {
        *self.zone_error.write().await = Some(err);
    }

    pub async fn fail_record_named(&self, name: &str) {
        self.failing_names.write().await.push(name.to_string());
    }

    pub async fn fail_deletion_of(&self, record_id: &str) {
        self.undeletable.write().await.push(record_id.to_string());
    }

    /// Domains a zone was created for.
    pub async fn zones_created(&self) -> Vec<String> {
        self.zones.read().await.keys().cloned().collect()
    }

    /// Records currently present, in creation order.
    pub async fn records(&self) -> Vec<(String, DnsRecord)> {
        self.records.read().await.clone()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock-dns"
    }

    async fn create_zone(&self, domain: &str) -> Result<ZoneCreation> {
        if let Some(err) = self.zone_error.read().await.clone() {
            return Err(err);
        }
        let mut zones = self.zones.write().await;
        let already_exists = zones.contains_key(domain);
        let next_id = format!("Z{}", zones.len() + 1);
        let zone_id = zones.entry(domain.to_string()).or_insert(next_id).clone();
        Ok(ZoneCreation {
            zone_id,
            name_servers: vec!["ns1.x".to_string(), "ns2.x".to_string()],
            already_exists,
        })
    }

    async fn create_record(&self, _zone_id: &str, record: &DnsRecord) -> Result<String> {
        if self.failing_names.read().await.contains(&record.name) {
            return Err(ProviderError::InvalidParameter {
                provider: "mock".to_string(),
                param: "name".to_string(),
                detail: "rejected".to_string(),
            });
        }
        let mut next = self.next_record.write().await;
        let id = format!("R{next}");
        *next += 1;
        self.records.write().await.push((id.clone(), record.clone()));
        Ok(id)
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        if self.undeletable.read().await.iter().any(|id| id == record_id) {
            return Err(network_error());
        }
        self.records.write().await.retain(|(id, _)| id != record_id);
        self.deleted.write().await.push(record_id.to_string());
        Ok(())
    }

    async fn get_zone_status(&self, zone_id: &str) -> Result<Option<ZoneStatus>> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .find(|(_, id)| *id == zone_id)
            .map(|(name, id)| ZoneStatus {
                zone_id: id.clone(),
                name: name.clone(),
                status: ZoneState::Active,
                name_servers: vec!["ns1.x".to_string(), "ns2.x".to_string()],
            }))
    }
}

// ===== MockHostingPlatform =====

pub struct MockHostingPlatform {
    add_error: RwLock<Option<ProviderError>>,
    remove_fails: RwLock<bool>,
    verification: RwLock<Vec<VerificationRecord>>,
    /// 第 N 次检查起返回已验证；None 表示永不验证
    verified_after: RwLock<Option<u32>>,
    checks: RwLock<u32>,
    added: RwLock<Vec<String>>,
    removed: RwLock<Vec<String>>,
    projects: RwLock<Vec<(String, Option<String>)>>,
}

impl MockHostingPlatform {
    pub fn new() -> Self {
        Self {
            add_error: RwLock::new(None),
            remove_fails: RwLock::new(false),
            verification: RwLock::new(Vec::new()),
            verified_after: RwLock::new(None),
            checks: RwLock::new(0),
            added: RwLock::new(Vec::new()),
            removed: RwLock::new(Vec::new()),
            projects: RwLock::new(Vec::new()),
        }
    }

    pub async fn fail_add(&self, err: ProviderError) {
        *self.add_error.write().await = Some(err);
    }

    pub async fn fail_removal(&self) {
        *self.remove_fails.write().await = true;
    }

    pub async fn require_verification(&self, record: VerificationRecord) {
        self.verification.write().await.push(record);
    }

    pub async fn verify_after(&self, checks: u32) {
        *self.verified_after.write().await = Some(checks);
    }

    pub async fn verification_checks(&self) -> u32 {
        *self.checks.read().await
    }

    pub async fn added(&self) -> Vec<String> {
        self.added.read().await.clone()
    }

    pub async fn removed(&self) -> Vec<String> {
        self.removed.read().await.clone()
    }

    pub async fn projects(&self) -> Vec<(String, Option<String>)> {
        self.projects.read().await.clone()
    }
}

#[async_trait]
impl HostingPlatform for MockHostingPlatform {
    fn id(&self) -> &'static str {
        "mock-hosting"
    }

    async fn add_domain(&self, domain: &str) -> Result<DomainAddition> {
        if let Some(err) = self.add_error.read().await.clone() {
            return Err(err);
        }
        let mut added = self.added.write().await;
        let already_exists = added.iter().any(|d| d == domain);
        added.push(domain.to_string());
        let verification_records = self.verification.read().await.clone();
        Ok(DomainAddition {
            name: domain.to_string(),
            verified: verification_records.is_empty(),
            verification_records,
            already_exists,
        })
    }

    async fn check_verified(&self, _domain: &str) -> Result<bool> {
        let mut checks = self.checks.write().await;
        *checks += 1;
        Ok(matches!(*self.verified_after.read().await, Some(n) if *checks >= n))
    }

    async fn remove_domain(&self, domain: &str) -> Result<()> {
        if *self.remove_fails.read().await {
            return Err(network_error());
        }
        self.removed.write().await.push(domain.to_string());
        Ok(())
    }

    async fn create_project(&self, name: &str, repository: Option<&str>) -> Result<HostingProject> {
        let mut projects = self.projects.write().await;
        projects.push((name.to_string(), repository.map(str::to_string)));
        Ok(HostingProject {
            id: format!("prj_{}", projects.len()),
            name: name.to_string(),
        })
    }
}

// ===== MockSourceHost =====

pub struct MockSourceHost {
    repositories: RwLock<HashMap<String, Repository>>,
    created: RwLock<Vec<String>>,
}

impl MockSourceHost {
    pub fn new() -> Self {
        Self {
            repositories: RwLock::new(HashMap::new()),
            created: RwLock::new(Vec::new()),
        }
    }

    fn repository(name: &str, private: bool) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            html_url: format!("https://github.com/acme/{name}"),
            clone_url: format!("https://github.com/acme/{name}.git"),
            private,
            default_branch: "main".to_string(),
        }
    }

    pub async fn add_repository(&self, name: &str) {
        self.repositories
            .write()
            .await
            .insert(name.to_string(), Self::repository(name, false));
    }

    pub async fn created(&self) -> Vec<String> {
        self.created.read().await.clone()
    }
}

#[async_trait]
impl SourceHost for MockSourceHost {
    fn id(&self) -> &'static str {
        "mock-source"
    }

    async fn get_repository(&self, name: &str) -> Result<Option<Repository>> {
        Ok(self.repositories.read().await.get(name).cloned())
    }

    async fn create_repository(&self, req: &CreateRepositoryRequest) -> Result<Repository> {
        let repo = Self::repository(&req.name, req.private);
        self.repositories
            .write()
            .await
            .insert(req.name.clone(), repo.clone());
        self.created.write().await.push(req.name.clone());
        Ok(repo)
    }
}

// ===== 测试工厂 =====

/// All four mocks, kept around for assertions after the context is handed out.
pub struct TestHarness {
    pub registrar: Arc<MockRegistrar>,
    pub dns: Arc<MockDnsProvider>,
    pub hosting: Arc<MockHostingPlatform>,
    pub source_host: Arc<MockSourceHost>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            registrar: Arc::new(MockRegistrar::new()),
            dns: Arc::new(MockDnsProvider::new()),
            hosting: Arc::new(MockHostingPlatform::new()),
            source_host: Arc::new(MockSourceHost::new()),
        }
    }

    pub fn context_without_source_host(&self) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(
            self.registrar.clone(),
            self.dns.clone(),
            self.hosting.clone(),
        ))
    }

    pub fn context(&self) -> Arc<ServiceContext> {
        Arc::new(
            ServiceContext::new(self.registrar.clone(), self.dns.clone(), self.hosting.clone())
                .with_source_host(self.source_host.clone()),
        )
    }
}
