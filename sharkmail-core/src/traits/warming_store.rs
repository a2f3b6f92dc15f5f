//! Warming session and activity persistence abstraction

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{SessionStatus, WarmingConfig, WarmingCounters, WarmingEmail, WarmingSession};

/// Warming session repository trait.
///
/// One session row per account. Start/stop go through
/// [`transition_status`](Self::transition_status) so concurrent callers race
/// to a single winner instead of double-initializing.
///
/// Platform implementation:
/// - Actix-Web: `DatabaseWarmingSessionRepository` (`SeaORM`)
#[async_trait]
pub trait WarmingSessionRepository: Send + Sync {
    /// The account's session, if one was ever configured.
    async fn find(&self, user_id: &str) -> CoreResult<Option<WarmingSession>>;

    /// Create the account's session if it does not exist yet.
    ///
    /// An existing session is left untouched (counters included).
    async fn create_if_absent(&self, user_id: &str, session: &WarmingSession) -> CoreResult<()>;

    /// Replace the session config without touching status or counters.
    async fn update_config(&self, user_id: &str, config: &WarmingConfig) -> CoreResult<()>;

    /// Atomic compare-and-swap on the session status.
    ///
    /// Moves the session to `to` only if its current status is in `from`;
    /// returns whether the transition happened. Counters are never touched.
    async fn transition_status(
        &self,
        user_id: &str,
        from: &[SessionStatus],
        to: SessionStatus,
    ) -> CoreResult<bool>;

    /// Add the delta to the session counters atomically.
    async fn increment_counters(&self, user_id: &str, delta: WarmingCounters) -> CoreResult<()>;

    /// All accounts whose session is currently active (drives the send loop).
    async fn active_user_ids(&self) -> CoreResult<Vec<String>>;
}

/// Warming activity log repository trait.
#[async_trait]
pub trait WarmingActivityRepository: Send + Sync {
    /// Append one activity entry.
    async fn append(&self, user_id: &str, email: &WarmingEmail) -> CoreResult<()>;

    /// Up to `limit` most recent entries, newest first.
    async fn recent(&self, user_id: &str, limit: usize) -> CoreResult<Vec<WarmingEmail>>;
}
