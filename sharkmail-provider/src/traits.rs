use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::types::{
    DnsRecord, OutboundEmail, RecordSpec, RoutingRule, RoutingRuleSpec, SendingDomain, SentEmail,
    Zone,
};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider).
    pub code: Option<String>,
    /// Raw error message.
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

/// Extra context available when mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name (for `RecordExists` etc.).
    pub record_name: Option<String>,
    /// Record ID (for `RecordNotFound` etc.).
    pub record_id: Option<String>,
    /// Domain name (for `DomainNotFound` etc.).
    pub domain: Option<String>,
}

/// Error mapping trait implemented by each provider (internal).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> crate::error::ProviderError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> crate::error::ProviderError {
        crate::error::ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> crate::error::ProviderError {
        crate::error::ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS provider trait: zones, records, and inbound email routing.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Validate the configured credentials against the remote API.
    async fn verify_credentials(&self) -> Result<bool>;

    /// List zones visible to the credentials.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// Fetch a single zone by identifier.
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;

    /// Create a zone for a newly registered domain.
    async fn create_zone(&self, domain_name: &str) -> Result<Zone>;

    /// List all DNS records in a zone.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    /// Create a DNS record.
    async fn create_record(&self, zone_id: &str, spec: &RecordSpec) -> Result<DnsRecord>;

    /// Update an existing DNS record.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        spec: &RecordSpec,
    ) -> Result<DnsRecord>;

    /// Delete a DNS record.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// Upsert a record keyed by `(type, name)`.
    ///
    /// Looks for an existing record with the same type and (normalized) name:
    /// matching content is left untouched, differing content is updated in
    /// place, and a missing record is created. Calling this repeatedly with
    /// the same spec never produces duplicates, which is what makes the
    /// platform's DNS configuration step safe to retry.
    async fn ensure_record(&self, zone_id: &str, spec: &RecordSpec) -> Result<DnsRecord> {
        let want_name = normalize_domain_name(&spec.name);
        let existing = self
            .list_records(zone_id)
            .await?
            .into_iter()
            .find(|r| {
                r.record_type == spec.record_type && normalize_domain_name(&r.name) == want_name
            });

        match existing {
            Some(record)
                if record.content == spec.content && record.priority == spec.priority =>
            {
                Ok(record)
            }
            Some(record) => self.update_record(zone_id, &record.id, spec).await,
            None => self.create_record(zone_id, spec).await,
        }
    }

    /// Enable inbound email routing on a zone.
    ///
    /// Idempotent at the provider: enabling an already-enabled zone succeeds.
    async fn enable_email_routing(&self, zone_id: &str) -> Result<()>;

    /// List the routing rules configured on a zone (catch-all included).
    async fn list_routing_rules(&self, zone_id: &str) -> Result<Vec<RoutingRule>>;

    /// Create a routing rule.
    async fn create_routing_rule(
        &self,
        zone_id: &str,
        spec: &RoutingRuleSpec,
    ) -> Result<RoutingRule>;

    /// Upsert a routing rule keyed by its matched address.
    ///
    /// An existing rule for the same address (or the catch-all) is reused;
    /// otherwise the rule is created. Safe under client retries.
    async fn ensure_routing_rule(
        &self,
        zone_id: &str,
        spec: &RoutingRuleSpec,
    ) -> Result<RoutingRule> {
        let existing = self
            .list_routing_rules(zone_id)
            .await?
            .into_iter()
            .find(|r| r.address == spec.address);

        match existing {
            Some(rule) => Ok(rule),
            None => self.create_routing_rule(zone_id, spec).await,
        }
    }
}

/// Mail provider trait: sending-domain verification and outbound mail.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Register a domain for sending.
    ///
    /// Idempotent: registering an already-registered domain returns the
    /// existing registration instead of failing.
    async fn register_domain(&self, domain_name: &str) -> Result<SendingDomain>;

    /// Look up a registered sending domain by name.
    async fn find_domain(&self, domain_name: &str) -> Result<Option<SendingDomain>>;

    /// Ask the provider to (re-)check DNS propagation for a domain.
    async fn request_verification(&self, domain_id: &str) -> Result<()>;

    /// Send a single email.
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail>;
}
