use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

/// Per-symbol EMA200 anchor derived from the last fully-closed daily candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub ema_prev200: f64,
    pub prior_close: f64,
    /// UTC calendar date this baseline was last computed.
    pub refreshed_on: NaiveDate,
}

impl Baseline {
    /// One-step exponential-smoothing projection of the EMA to the live
    /// price, treating the in-progress day as one more sample. An
    /// approximation of the next closed-candle EMA; the refresher replaces
    /// it once the daily candle closes.
    pub fn project(&self, price: f64, alpha: f64) -> f64 {
        self.ema_prev200 * (1.0 - alpha) + price * alpha
    }

    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.refreshed_on < today
    }
}

/// Keyed store of baselines, shared between the tick path (reads, lazy
/// inserts) and the daily refresher (writes). `Baseline` is `Copy`, so a
/// reader always gets a consistent snapshot; the lock is never held across
/// an await point.
#[derive(Debug, Default)]
pub struct BaselineStore {
    inner: RwLock<HashMap<String, Baseline>>,
}

impl BaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<Baseline> {
        self.inner.read().unwrap().get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.inner.read().unwrap().contains_key(symbol)
    }

    /// Insert or overwrite a baseline. `refreshed_on` is monotonic per
    /// symbol: an insert dated before the stored entry is ignored.
    pub fn insert(&self, symbol: &str, baseline: Baseline) {
        let mut map = self.inner.write().unwrap();
        match map.get(symbol) {
            Some(existing) if existing.refreshed_on > baseline.refreshed_on => {
                tracing::warn!(
                    symbol,
                    stored = %existing.refreshed_on,
                    incoming = %baseline.refreshed_on,
                    "Ignoring baseline dated before the stored one"
                );
            }
            _ => {
                map.insert(symbol.to_string(), baseline);
            }
        }
    }

    /// Symbols whose baseline predates `today`, capped at `limit` per call.
    pub fn stale_symbols(&self, today: NaiveDate, limit: usize) -> Vec<String> {
        let map = self.inner.read().unwrap();
        let mut stale: Vec<String> = map
            .iter()
            .filter(|(_, b)| b.is_stale(today))
            .map(|(s, _)| s.clone())
            .collect();
        // Deterministic refresh order so symbols beyond the cap are not
        // starved across cycles.
        stale.sort();
        stale.truncate(limit);
        stale
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}
