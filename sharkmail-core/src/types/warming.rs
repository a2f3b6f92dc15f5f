//! Warming session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Lower bound for `emails_per_day`.
pub const MIN_EMAILS_PER_DAY: u32 = 1;
/// Upper bound for `emails_per_day` (warming-session limit; campaign-scoped
/// send limits are a separate concern).
pub const MAX_EMAILS_PER_DAY: u32 = 50;
/// Maximum entries in the recent-activity log returned to clients.
pub const RECENT_EMAILS_CAP: usize = 20;

/// Warming engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmingConfig {
    /// Target sends per day across the account's verified domains.
    pub emails_per_day: u32,
    /// Fraction of emails flagged as AI-generated content, in `[0, 1]`.
    pub ai_frequency: f64,
    /// Probability a sent email receives a simulated reply, in `[0, 1]`.
    pub reply_probability: f64,
}

impl Default for WarmingConfig {
    fn default() -> Self {
        Self {
            emails_per_day: 10,
            ai_frequency: 0.3,
            reply_probability: 0.3,
        }
    }
}

impl WarmingConfig {
    /// Validate configuration bounds.
    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_EMAILS_PER_DAY..=MAX_EMAILS_PER_DAY).contains(&self.emails_per_day) {
            return Err(CoreError::ValidationError(format!(
                "emailsPerDay must be between {MIN_EMAILS_PER_DAY} and {MAX_EMAILS_PER_DAY}"
            )));
        }
        if !(0.0..=1.0).contains(&self.ai_frequency) {
            return Err(CoreError::ValidationError(
                "aiFrequency must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reply_probability) {
            return Err(CoreError::ValidationError(
                "replyProbability must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Warming session status.
///
/// Transitions: `not_configured → inactive → active ⇄ inactive`. There is no
/// client-visible error state; engine failures are absorbed server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session has ever been configured for the account.
    NotConfigured,
    /// Configured but not sending.
    Inactive,
    /// Send loop running.
    Active,
}

/// Derived counters, incremented by the send loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmingCounters {
    /// Every email sent, replies included.
    pub emails_sent_total: u64,
    /// Emails flagged as AI-generated.
    pub ai_emails_sent: u64,
    /// Simulated replies sent.
    pub replies_sent: u64,
}

/// The per-account warming session singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmingSession {
    pub status: SessionStatus,
    pub config: WarmingConfig,
    pub counters: WarmingCounters,
    pub updated_at: DateTime<Utc>,
}

impl WarmingSession {
    /// A fresh, never-started session with the given config.
    #[must_use]
    pub fn inactive(config: WarmingConfig) -> Self {
        Self {
            status: SessionStatus::Inactive,
            config,
            counters: WarmingCounters::default(),
            updated_at: Utc::now(),
        }
    }
}

/// One entry of the warming activity log.
///
/// Wire field names are snake_case to match what the dashboard reads
/// (`from_email`, `to_email`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmingEmail {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub is_ai: bool,
    pub is_reply: bool,
    pub sent_at: DateTime<Utc>,
}

/// `GET /api/warming/status` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmingStatusReport {
    pub status: SessionStatus,
    pub emails_per_day: u32,
    pub ai_frequency: f64,
    pub reply_probability: f64,
    pub emails_sent_total: u64,
    pub ai_emails_sent: u64,
    pub replies_sent: u64,
    pub recent_emails: Vec<WarmingEmail>,
}

impl WarmingStatusReport {
    /// Assemble the report from a session and its recent activity.
    #[must_use]
    pub fn new(session: &WarmingSession, recent_emails: Vec<WarmingEmail>) -> Self {
        Self {
            status: session.status,
            emails_per_day: session.config.emails_per_day,
            ai_frequency: session.config.ai_frequency,
            reply_probability: session.config.reply_probability,
            emails_sent_total: session.counters.emails_sent_total,
            ai_emails_sent: session.counters.ai_emails_sent,
            replies_sent: session.counters.replies_sent,
            recent_emails,
        }
    }

    /// Report for an account that never configured warming.
    #[must_use]
    pub fn not_configured() -> Self {
        let config = WarmingConfig::default();
        Self {
            status: SessionStatus::NotConfigured,
            emails_per_day: config.emails_per_day,
            ai_frequency: config.ai_frequency,
            reply_probability: config.reply_probability,
            emails_sent_total: 0,
            ai_emails_sent: 0,
            replies_sent: 0,
            recent_emails: Vec::new(),
        }
    }
}
