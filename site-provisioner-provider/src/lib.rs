//! # site-provisioner-provider
//!
//! Typed clients for the third-party APIs a website is provisioned against: a domain
//! registrar, a DNS host, a hosting platform and a source-control host.
//!
//! ## Supported Providers
//!
//! | Concern | Provider | Trait | Feature Flag | Auth Method |
//! |---------|----------|-------|-------------|-------------|
//! | Registrar | [Namecheap](https://www.namecheap.com/support/api/) | [`Registrar`] | `namecheap` | API user/key + whitelisted IP |
//! | DNS | [Cloudflare](https://developers.cloudflare.com/api/) | [`DnsProvider`] | `cloudflare` | Bearer Token |
//! | Hosting | [Vercel](https://vercel.com/docs/rest-api) | [`HostingPlatform`] | `vercel` | Bearer Token |
//! | Source | [GitHub](https://docs.github.com/en/rest) | [`SourceHost`] | `github` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable all providers listed above.
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and musl targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use site_provisioner_provider::{create_registrar, NamecheapConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registrar = create_registrar(&NamecheapConfig {
//!         api_user: "alice".to_string(),
//!         api_key: "your-key".to_string(),
//!         client_ip: "203.0.113.7".to_string(),
//!         sandbox: true,
//!         ..NamecheapConfig::default()
//!     })?;
//!
//!     let availability = registrar.check_availability("example.com").await?;
//!     println!("{} available: {}", availability.domain, availability.available);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! The error enum provides structured variants for common failure modes:
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::AlreadyExists`]: conflicting resource (callers reuse it)
//! - [`ProviderError::DomainUnavailable`]: the domain cannot be registered
//! - [`ProviderError::RateLimited`]: API rate limit exceeded (transient)
//! - [`ProviderError::NetworkError`]: network connectivity issue (transient)
//!
//! Adapters never retry. [`ProviderError::is_transient`] tells the caller which failures a
//! retry loop may absorb.

mod config;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export configuration
pub use config::{CloudflareConfig, GithubConfig, NamecheapConfig, RegistrantContact, VercelConfig};

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::enabled_providers;
#[cfg(feature = "cloudflare")]
pub use factory::create_dns_provider;
#[cfg(feature = "vercel")]
pub use factory::create_hosting_platform;
#[cfg(feature = "namecheap")]
pub use factory::create_registrar;
#[cfg(feature = "github")]
pub use factory::create_source_host;

// Re-export public traits only (internal traits are not exported)
pub use traits::{DnsProvider, HostingPlatform, Registrar, SourceHost};

// Re-export types
pub use types::{
    BatchCreateFailure, BatchCreateResult, CreateRepositoryRequest, DnsRecord, DnsRecordType,
    DomainAddition, DomainAvailability, HostingProject, PurchaseReceipt, Repository,
    VerificationRecord, ZoneCreation, ZoneState, ZoneStatus,
};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "namecheap")]
pub use providers::NamecheapRegistrar;

#[cfg(feature = "vercel")]
pub use providers::VercelPlatform;

#[cfg(feature = "github")]
pub use providers::GithubSourceHost;
