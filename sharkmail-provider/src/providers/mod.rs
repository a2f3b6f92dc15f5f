//! Concrete provider implementations.

pub(crate) mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;

#[cfg(feature = "resend")]
mod resend;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;

#[cfg(feature = "resend")]
pub use resend::ResendProvider;
