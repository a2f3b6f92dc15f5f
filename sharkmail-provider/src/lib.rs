//! # sharkmail-provider
//!
//! Typed clients for the upstream APIs the warming platform drives:
//!
//! | Provider | Feature Flag | Concern | Auth Method |
//! |----------|-------------|---------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | DNS zones, records, email routing | Bearer Token |
//! | [Resend](https://resend.com/) | `resend` | Sending-domain verification, outbound mail | Bearer Token |
//!
//! Both concerns are abstracted behind traits ([`DnsProvider`], [`MailProvider`])
//! so the core state machine never depends on a concrete vendor.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Transient
//! errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically retried
//! with exponential backoff by the built-in HTTP helper.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sharkmail_provider::{CloudflareProvider, DnsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dns = CloudflareProvider::new("your-token".to_string());
//!     dns.verify_credentials().await?;
//!     for zone in dns.list_zones().await? {
//!         println!("{} ({:?})", zone.name, zone.status);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod http_client;
mod providers;
mod traits;
mod types;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core traits only (internal mapping traits stay private)
pub use traits::{DnsProvider, MailProvider};

// Re-export types
pub use types::{
    DnsRecord, DnsRecordType, OutboundEmail, RecordSpec, RoutingRule, RoutingRuleSpec, SentEmail,
    SendingDomain, SendingDomainStatus, Zone, ZoneStatus,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "resend")]
pub use providers::ResendProvider;
