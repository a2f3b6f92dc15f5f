//! Warming engine session control and the send/reply cycle

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    OutboundEmail, SessionStatus, WarmingConfig, WarmingCounters, WarmingEmail, WarmingSession,
    WarmingStatus, WarmingStatusReport, RECENT_EMAILS_CAP,
};

/// Subject pool for synthetic warming emails.
const SUBJECTS: [&str; 6] = [
    "Quick question",
    "Following up on our chat",
    "Great connecting last week",
    "Thoughts on next steps?",
    "Checking in",
    "Re: scheduling",
];

/// Body pool for template-based emails.
const BODIES: [&str; 4] = [
    "Hey,\n\nJust wanted to follow up on the conversation from earlier. Let me know when you have a minute.\n\nBest",
    "Hi,\n\nHope your week is going well. Any update on your side?\n\nThanks",
    "Hello,\n\nCircling back on this. Happy to jump on a call if easier.\n\nCheers",
    "Hi there,\n\nQuick note to keep the thread warm. Talk soon.\n\nBest",
];

/// Body pool for emails flagged as AI-generated content.
const AI_BODIES: [&str; 3] = [
    "Hi,\n\nI was reviewing our recent exchange and wanted to share a quick summary of where things stand. The main open item is timing, and I think we can close that out this week. Would Thursday work for a short call?\n\nBest regards",
    "Hello,\n\nThanks again for the detailed notes. I put together a few thoughts on the proposal and would value your perspective, especially on the rollout schedule. Let me know what works.\n\nKind regards",
    "Hi,\n\nFollowing up with a brief recap: we aligned on the overall approach, and the remaining question is scope. I drafted a short outline and can send it over whenever convenient.\n\nBest",
];

/// Simulated reply body.
const REPLY_BODY: &str =
    "Thanks for reaching out! This sounds good, let me take a look and get back to you shortly.";

/// Cadence of the send loop for a given config.
#[must_use]
pub fn interval_between_sends(config: &WarmingConfig) -> Duration {
    Duration::from_secs(86_400 / u64::from(config.emails_per_day.max(1)))
}

/// Warming engine control: the per-account session singleton and its cycle.
pub struct WarmingControlService {
    ctx: Arc<ServiceContext>,
}

impl WarmingControlService {
    /// Create a warming control service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Start the warming engine for an account.
    ///
    /// Requires at least one domain with `warming_status = verified`.
    /// Activation is a compare-and-swap so two racing starts initialize the
    /// session exactly once; a start while already active only refreshes the
    /// config and never resets counters.
    pub async fn start(&self, user_id: &str, config: WarmingConfig) -> CoreResult<()> {
        config.validate()?;

        if self.verified_domain_count(user_id).await? == 0 {
            return Err(CoreError::PreconditionFailed(
                "Enable warming on at least one domain first".to_string(),
            ));
        }

        self.ctx
            .warming_sessions
            .create_if_absent(user_id, &WarmingSession::inactive(config.clone()))
            .await?;
        self.ctx
            .warming_sessions
            .update_config(user_id, &config)
            .await?;

        let transitioned = self
            .ctx
            .warming_sessions
            .transition_status(user_id, &[SessionStatus::Inactive], SessionStatus::Active)
            .await?;

        if transitioned {
            log::info!("Warming session started for {user_id}");
        } else {
            log::info!("Warming session already active for {user_id}; config updated");
        }
        Ok(())
    }

    /// Stop the warming engine. Safe to call when already inactive or never
    /// configured; counters are untouched either way.
    pub async fn stop(&self, user_id: &str) -> CoreResult<()> {
        let transitioned = self
            .ctx
            .warming_sessions
            .transition_status(user_id, &[SessionStatus::Active], SessionStatus::Inactive)
            .await?;

        if transitioned {
            log::info!("Warming session stopped for {user_id}");
        }
        Ok(())
    }

    /// Replace the session config without touching status or counters.
    pub async fn update_config(&self, user_id: &str, config: WarmingConfig) -> CoreResult<()> {
        config.validate()?;

        self.ctx
            .warming_sessions
            .create_if_absent(user_id, &WarmingSession::inactive(config.clone()))
            .await?;
        self.ctx
            .warming_sessions
            .update_config(user_id, &config)
            .await
    }

    /// Current session config, counters, and bounded recent activity.
    pub async fn status(&self, user_id: &str) -> CoreResult<WarmingStatusReport> {
        let Some(session) = self.ctx.warming_sessions.find(user_id).await? else {
            return Ok(WarmingStatusReport::not_configured());
        };

        let recent = self
            .ctx
            .warming_activity
            .recent(user_id, RECENT_EMAILS_CAP)
            .await?;
        Ok(WarmingStatusReport::new(&session, recent))
    }

    /// One tick of the send loop for an account.
    ///
    /// Picks a sender and a distinct recipient among the verified domains'
    /// warming addresses, sends a templated email, logs it, and bumps the
    /// counters; with probability `reply_probability` a simulated reply goes
    /// back the other way. Provider failures are absorbed (the counters just
    /// stop advancing) so the session never shows a client-visible fault.
    ///
    /// Returns the primary email that was sent, if any.
    pub async fn run_warming_cycle<R: Rng + Send>(
        &self,
        user_id: &str,
        rng: &mut R,
    ) -> CoreResult<Option<WarmingEmail>> {
        let Some(session) = self.ctx.warming_sessions.find(user_id).await? else {
            return Ok(None);
        };
        if session.status != SessionStatus::Active {
            return Ok(None);
        }

        let addresses: Vec<String> = self
            .ctx
            .domain_repository
            .find_all(user_id)
            .await?
            .iter()
            .filter(|d| d.warming_status == WarmingStatus::Verified)
            .flat_map(crate::types::Domain::warming_addresses)
            .collect();

        if addresses.len() < 2 {
            log::warn!("Warming cycle skipped for {user_id}: not enough addresses");
            return Ok(None);
        }

        // Draw all randomness up front; everything after is deterministic
        let sender_idx = rng.random_range(0..addresses.len());
        let recipient_idx =
            (sender_idx + 1 + rng.random_range(0..addresses.len() - 1)) % addresses.len();
        let is_ai = rng.random_bool(session.config.ai_frequency.clamp(0.0, 1.0));
        let subject = SUBJECTS[rng.random_range(0..SUBJECTS.len())];
        let body = if is_ai {
            AI_BODIES[rng.random_range(0..AI_BODIES.len())]
        } else {
            BODIES[rng.random_range(0..BODIES.len())]
        };
        let with_reply = rng.random_bool(session.config.reply_probability.clamp(0.0, 1.0));

        let from_email = addresses[sender_idx].clone();
        let to_email = addresses[recipient_idx].clone();

        if let Err(e) = self
            .ctx
            .mailer
            .send(&OutboundEmail {
                from: from_email.clone(),
                to: to_email.clone(),
                subject: subject.to_string(),
                text: body.to_string(),
            })
            .await
        {
            log::warn!("Warming send failed for {user_id}: {e}");
            return Ok(None);
        }

        let email = WarmingEmail {
            from_email: from_email.clone(),
            to_email: to_email.clone(),
            subject: subject.to_string(),
            is_ai,
            is_reply: false,
            sent_at: Utc::now(),
        };
        self.ctx.warming_activity.append(user_id, &email).await?;

        let mut delta = WarmingCounters {
            emails_sent_total: 1,
            ai_emails_sent: u64::from(is_ai),
            replies_sent: 0,
        };

        if with_reply {
            let reply_subject = format!("Re: {subject}");
            let reply_sent = self
                .ctx
                .mailer
                .send(&OutboundEmail {
                    from: to_email.clone(),
                    to: from_email.clone(),
                    subject: reply_subject.clone(),
                    text: REPLY_BODY.to_string(),
                })
                .await;

            match reply_sent {
                Ok(_) => {
                    let reply = WarmingEmail {
                        from_email: to_email,
                        to_email: from_email,
                        subject: reply_subject,
                        is_ai: false,
                        is_reply: true,
                        sent_at: Utc::now(),
                    };
                    self.ctx.warming_activity.append(user_id, &reply).await?;
                    delta.emails_sent_total += 1;
                    delta.replies_sent += 1;
                }
                Err(e) => log::warn!("Warming reply failed for {user_id}: {e}"),
            }
        }

        self.ctx
            .warming_sessions
            .increment_counters(user_id, delta)
            .await?;

        Ok(Some(email))
    }

    async fn verified_domain_count(&self, user_id: &str) -> CoreResult<usize> {
        Ok(self
            .ctx
            .domain_repository
            .find_all(user_id)
            .await?
            .iter()
            .filter(|d| d.warming_status == WarmingStatus::Verified)
            .count())
    }
}
