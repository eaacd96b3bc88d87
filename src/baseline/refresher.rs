use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use super::loader::BaselineLoader;
use super::store::BaselineStore;

/// Timer-driven baseline refresh. Each cycle re-derives the EMA200 anchor
/// for symbols not yet refreshed on the current UTC day, up to
/// `max_per_cycle` to bound request volume against the klines endpoint.
/// Failures for one symbol never abort the cycle for the rest.
pub async fn run(
    store: Arc<BaselineStore>,
    loader: Arc<BaselineLoader>,
    period: Duration,
    max_per_cycle: usize,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // Consume the immediate first tick; lazy init already seeded anything
    // seen so far today.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::info!("Refresher stopped by shutdown");
                return;
            }
        }

        let today = Utc::now().date_naive();
        let stale = store.stale_symbols(today, max_per_cycle);
        if stale.is_empty() {
            continue;
        }
        tracing::info!(count = stale.len(), %today, "Refreshing stale baselines");

        for symbol in &stale {
            match loader.load(symbol).await {
                Ok(baseline) => {
                    tracing::debug!(
                        symbol,
                        ema_prev200 = baseline.ema_prev200,
                        "Baseline refreshed"
                    );
                    store.insert(symbol, baseline);
                }
                Err(e) => {
                    tracing::warn!(symbol, error = %e, "Baseline refresh failed");
                }
            }
        }
    }
}
