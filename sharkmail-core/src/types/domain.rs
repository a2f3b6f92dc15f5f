//! Domain lifecycle types.
//!
//! Wire field names are snake_case to match what the dashboard reads
//! (`domain_name`, `dns_configured`, `warming_status`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharkmail_provider::ZoneStatus;

/// Conventional local-parts provisioned for every warming domain.
pub const WARMING_LOCAL_PARTS: [&str; 4] = ["team", "hello", "contact", "info"];

/// Coarse registration/ownership status of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Zone exists but is not fully active upstream.
    Pending,
    /// Zone is active.
    Active,
    /// Zone is in a bad state upstream.
    Error,
}

impl From<ZoneStatus> for DomainStatus {
    fn from(status: ZoneStatus) -> Self {
        match status {
            ZoneStatus::Active => Self::Active,
            ZoneStatus::Pending | ZoneStatus::Unknown => Self::Pending,
            ZoneStatus::Paused => Self::Error,
        }
    }
}

/// Warming lifecycle status, independent of `warming_enabled` so a
/// "requested but not yet propagated" state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmingStatus {
    /// Warming has not been requested for this domain.
    NotEnabled,
    /// Warming requested; waiting for DNS/mailbox propagation.
    Pending,
    /// Propagation confirmed. Terminal: never regresses.
    Verified,
}

/// One registered/imported domain under management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Domain ID (UUID)
    pub id: String,
    /// Owning account
    pub user_id: String,
    /// Fully-qualified domain name; unique per account
    pub domain_name: String,
    /// Registration/ownership status
    pub status: DomainStatus,
    /// DNS provider zone reference (None until provisioning completes)
    pub zone_id: Option<String>,
    /// True only after the DNS configuration step succeeds
    pub dns_configured: bool,
    /// True only after the email routing step succeeds
    pub email_routing_enabled: bool,
    /// Destination for inbound forwarding
    pub forward_to: Option<String>,
    /// Set by the warming enablement step; irreversible via the API
    pub warming_enabled: bool,
    /// Warming lifecycle status
    pub warming_status: WarmingStatus,
    /// Created time
    pub created_at: DateTime<Utc>,
    /// Updated time
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// The four convention-bound warming addresses for this domain.
    ///
    /// Derived, never stored.
    #[must_use]
    pub fn warming_addresses(&self) -> Vec<String> {
        WARMING_LOCAL_PARTS
            .iter()
            .map(|local| format!("{local}@{}", self.domain_name))
            .collect()
    }
}

/// Request body for `POST /api/domains/import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDomainRequest {
    /// DNS provider zone reference
    pub zone_id: String,
    /// Domain name the zone serves
    pub domain_name: String,
}

/// Request body for `POST /api/domains/purchase`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseDomainRequest {
    /// Domain name to register
    pub domain: String,
}

/// Outcome of one step of a setup flow, shown in the dashboard's setup log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStepStatus {
    Success,
    Warning,
    Error,
    Skipped,
}

/// One line of a setup log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupLogEntry {
    /// Short step label
    pub step: String,
    /// Step outcome
    pub status: SetupStepStatus,
    /// Human-readable detail
    pub message: String,
}

impl SetupLogEntry {
    pub fn success(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: SetupStepStatus::Success,
            message: message.into(),
        }
    }

    pub fn warning(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: SetupStepStatus::Warning,
            message: message.into(),
        }
    }
}

/// Response of the warming verification poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmingCheck {
    /// Current warming status after the check
    pub status: WarmingStatus,
    /// Convenience flag: `status == verified`
    pub verified: bool,
}
