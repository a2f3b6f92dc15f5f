//! Background warming engine loop
//!
//! Drives one send cycle per active session at the cadence its config asks
//! for. The loop polls the session table rather than holding state about
//! which accounts exist, so starts/stops from any server instance are picked
//! up within a tick.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{interval, Instant};

use sharkmail_core::services::interval_between_sends;

use crate::state::AppState;

/// Scheduling granularity. The slowest allowed cadence is one send every
/// 1728 s (50/day), so a minute tick is comfortably inside it.
const ENGINE_TICK: Duration = Duration::from_secs(60);

/// Spawn the engine loop.
pub fn spawn(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(state))
}

async fn run(state: Arc<AppState>) {
    tracing::info!("Warming engine loop started");
    let mut tick = interval(ENGINE_TICK);
    let mut last_sent: HashMap<String, Instant> = HashMap::new();

    loop {
        tick.tick().await;

        let user_ids = match state.ctx.warming_sessions.active_user_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("Engine: failed to list active sessions: {e}");
                continue;
            }
        };

        last_sent.retain(|user_id, _| user_ids.contains(user_id));

        for user_id in user_ids {
            let session = match state.ctx.warming_sessions.find(&user_id).await {
                Ok(Some(session)) => session,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Engine: failed to load session for {user_id}: {e}");
                    continue;
                }
            };

            let due = last_sent
                .get(&user_id)
                .is_none_or(|sent| sent.elapsed() >= interval_between_sends(&session.config));
            if !due {
                continue;
            }

            let mut rng = StdRng::from_os_rng();
            match state.control.run_warming_cycle(&user_id, &mut rng).await {
                Ok(Some(email)) => {
                    last_sent.insert(user_id.clone(), Instant::now());
                    tracing::info!(
                        "Engine: warming email {} -> {} ({})",
                        email.from_email,
                        email.to_email,
                        email.subject
                    );
                }
                // A skipped or absorbed cycle still waits out the interval;
                // hammering a failing provider helps nobody
                Ok(None) => {
                    last_sent.insert(user_id.clone(), Instant::now());
                }
                Err(e) => {
                    tracing::warn!("Engine: cycle failed for {user_id}: {e}");
                }
            }
        }
    }
}
