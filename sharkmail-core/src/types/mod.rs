//! Type definitions module

mod domain;
mod warming;

pub use domain::{
    Domain, DomainStatus, ImportDomainRequest, PurchaseDomainRequest, SetupLogEntry,
    SetupStepStatus, WarmingCheck, WarmingStatus, WARMING_LOCAL_PARTS,
};
pub use warming::{
    SessionStatus, WarmingConfig, WarmingCounters, WarmingEmail, WarmingSession,
    WarmingStatusReport, MAX_EMAILS_PER_DAY, MIN_EMAILS_PER_DAY, RECENT_EMAILS_CAP,
};

// Re-export the provider library's public types
pub use sharkmail_provider::{
    DnsRecord, DnsRecordType, OutboundEmail, RecordSpec, RoutingRule, RoutingRuleSpec,
    SendingDomain, SendingDomainStatus, SentEmail, Zone, ZoneStatus,
};
