//! Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "github")]
mod github;
#[cfg(feature = "namecheap")]
mod namecheap;
#[cfg(feature = "vercel")]
mod vercel;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
#[cfg(feature = "github")]
pub use github::GithubSourceHost;
#[cfg(feature = "namecheap")]
pub use namecheap::NamecheapRegistrar;
#[cfg(feature = "vercel")]
pub use vercel::VercelPlatform;
