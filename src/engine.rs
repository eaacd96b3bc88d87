use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::alert::{classify, TouchState};
use crate::baseline::{BaselineLoader, BaselineStore};
use crate::error::AppError;
use crate::indicator::ema::smoothing_alpha;
use crate::model::tick::Tick;
use crate::notifier::{format_alert, TelegramNotifier};
use crate::universe::SymbolUniverse;

/// Drives the per-tick pipeline: universe filter, lazy baseline fetch, EMA
/// projection, side classification, state-machine step, notification. Owns
/// all touch state; no error in this path terminates the loop.
pub struct Engine {
    store: Arc<BaselineStore>,
    loader: Arc<BaselineLoader>,
    universe: SymbolUniverse,
    notifier: TelegramNotifier,
    states: HashMap<String, TouchState>,
    alpha: f64,
    touch_eps: f64,
    reset_eps: f64,
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<BaselineStore>,
        loader: Arc<BaselineLoader>,
        universe: SymbolUniverse,
        notifier: TelegramNotifier,
        ema_span: usize,
        touch_eps: f64,
        reset_eps: f64,
    ) -> Self {
        Self {
            store,
            loader,
            universe,
            notifier,
            states: HashMap::new(),
            alpha: smoothing_alpha(ema_span),
            touch_eps,
            reset_eps,
        }
    }

    pub async fn run(
        mut self,
        mut tick_rx: mpsc::Receiver<Tick>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            let tick = tokio::select! {
                tick = tick_rx.recv() => match tick {
                    Some(tick) => tick,
                    None => {
                        tracing::info!("Tick channel closed, engine stopping");
                        return;
                    }
                },
                _ = shutdown.changed() => {
                    tracing::info!("Engine stopped by shutdown");
                    return;
                }
            };

            if let Err(e) = self.on_tick(&tick).await {
                if e.is_transient() {
                    tracing::warn!(symbol = %tick.symbol, error = %e, "Tick dropped");
                } else {
                    tracing::debug!(symbol = %tick.symbol, error = %e, "Tick dropped");
                }
            }
        }
    }

    async fn on_tick(&mut self, tick: &Tick) -> Result<(), AppError> {
        if !self.universe.contains(&tick.symbol) {
            return Ok(());
        }

        // Lazy init: first sight of a symbol costs one klines fetch. Other
        // symbols queue behind it on the single consumer; the refresher
        // keeps the anchor fresh from here on.
        if !self.store.contains(&tick.symbol) {
            let baseline = self.loader.load(&tick.symbol).await?;
            tracing::info!(
                symbol = %tick.symbol,
                ema_prev200 = baseline.ema_prev200,
                "Baseline seeded on first tick"
            );
            self.store.insert(&tick.symbol, baseline);
            self.states.insert(tick.symbol.clone(), TouchState::new());
        }

        if let Some(text) = self.evaluate_tick(tick) {
            tracing::info!(alert = %text, "Alert");
            self.notifier.send(&text).await;
        }
        Ok(())
    }

    /// Projection, classification, and state transition for one tick whose
    /// baseline already exists. Returns the formatted alert, if any.
    pub fn evaluate_tick(&mut self, tick: &Tick) -> Option<String> {
        let baseline = self.store.get(&tick.symbol)?;
        let ema_now = baseline.project(tick.price, self.alpha);

        let Some(side) = classify(tick.price, ema_now, self.touch_eps) else {
            tracing::debug!(symbol = %tick.symbol, ema_now, "Unclassifiable tick skipped");
            return None;
        };

        let state = self.states.entry(tick.symbol.clone()).or_default();
        let event = state.step(side, tick.price, ema_now, self.reset_eps)?;
        Some(format_alert(&tick.symbol, event, tick.price, ema_now))
    }
}
