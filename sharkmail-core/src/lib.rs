//! Sharkmail Core Library
//!
//! Provides the business logic for the cold-email warming platform:
//! - Domain Registry (import/purchase/delete, deduplicated per account)
//! - DNS Configuration and Email Routing steps (idempotent, retry-safe)
//! - Warming enablement and verification polling (monotonic)
//! - Warming engine session control and the send/reply cycle
//!
//! The storage layer and the upstream DNS/mail providers are abstracted
//! through traits, so the same services back any server frontend.

pub mod crypto;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod util;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{DomainRepository, WarmingActivityRepository, WarmingSessionRepository};
