//! Resend provider: sending-domain verification and outbound mail.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) use types::{ResendDomain, ResendDomainList};

pub(crate) const RESEND_API_BASE: &str = "https://api.resend.com";

/// Resend mail provider.
pub struct ResendProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
}

impl ResendProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: create_http_client(),
            api_key,
        }
    }
}
