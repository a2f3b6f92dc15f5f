use serde::{Deserialize, Serialize};

// ============ Zone Types ============

/// Status of a zone within the DNS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and resolving.
    Active,
    /// Zone is pending activation/verification.
    Pending,
    /// Zone is paused (not resolving).
    Paused,
    /// Status could not be determined.
    Unknown,
}

/// A DNS zone as managed by the DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
    /// Current zone status.
    pub status: ZoneStatus,
}

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"MX"`, `"TXT"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record (SPF, DKIM, DMARC).
    Txt,
}

impl DnsRecordType {
    /// Uppercase wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }
}

/// A DNS record as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Zone identifier this record belongs to.
    pub zone_id: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content (address, hostname, or text payload).
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// MX priority (lower = preferred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Whether the CDN proxy is enabled (Cloudflare only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Desired state of a single DNS record, used for create/update/upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSpec {
    /// Record type.
    pub record_type: DnsRecordType,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// MX priority (lower = preferred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl RecordSpec {
    /// TXT record with the default TTL.
    #[must_use]
    pub fn txt(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            record_type: DnsRecordType::Txt,
            name: name.into(),
            content: content.into(),
            ttl: DEFAULT_RECORD_TTL,
            priority: None,
        }
    }

    /// MX record with the default TTL.
    #[must_use]
    pub fn mx(name: impl Into<String>, exchange: impl Into<String>, priority: u16) -> Self {
        Self {
            record_type: DnsRecordType::Mx,
            name: name.into(),
            content: exchange.into(),
            ttl: DEFAULT_RECORD_TTL,
            priority: Some(priority),
        }
    }
}

/// Default TTL for records this platform provisions.
pub const DEFAULT_RECORD_TTL: u32 = 3600;

// ============ Email Routing Types ============

/// An inbound email routing rule on a zone.
///
/// `address == None` designates the zone's catch-all rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    /// Provider-specific rule identifier.
    pub id: String,
    /// Matched recipient address; `None` for the catch-all rule.
    pub address: Option<String>,
    /// Destination address mail is forwarded to.
    pub forward_to: String,
    /// Whether the rule is active.
    pub enabled: bool,
}

/// Desired state of a routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRuleSpec {
    /// Recipient address to match; `None` for the catch-all rule.
    pub address: Option<String>,
    /// Destination address to forward to.
    pub forward_to: String,
}

// ============ Sending Domain Types ============

/// Verification status of a sending domain at the mail provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendingDomainStatus {
    /// Verification records not yet observed.
    Pending,
    /// DNS propagation confirmed; domain may send.
    Verified,
    /// Verification failed.
    Failed,
    /// Status could not be determined.
    Unknown,
}

impl SendingDomainStatus {
    /// Whether the domain is cleared for sending.
    #[must_use]
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// A domain registered with the mail provider for outbound sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendingDomain {
    /// Provider-specific domain identifier.
    pub id: String,
    /// Domain name.
    pub name: String,
    /// Current verification status.
    pub status: SendingDomainStatus,
    /// DNS records the provider requires for verification (SPF/DKIM).
    pub required_records: Vec<RecordSpec>,
}

// ============ Outbound Mail Types ============

/// A single outbound email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEmail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

/// Receipt for an accepted outbound email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentEmail {
    /// Provider-assigned message identifier.
    pub id: String,
}
