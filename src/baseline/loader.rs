use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::binance::rest::BinanceRestClient;
use crate::error::AppError;
use crate::indicator::ema::Ema;
use crate::model::candle::Candle;

use super::store::Baseline;

/// Derives a baseline for one symbol from daily candles. Cold start and the
/// periodic refresh go through the same `load`.
pub struct BaselineLoader {
    rest: Arc<BinanceRestClient>,
    span: usize,
    history_limit: usize,
}

impl BaselineLoader {
    pub fn new(rest: Arc<BinanceRestClient>, span: usize, history_limit: usize) -> Self {
        assert!(
            history_limit > span,
            "history_limit must exceed the EMA span"
        );
        Self {
            rest,
            span,
            history_limit,
        }
    }

    pub async fn load(&self, symbol: &str) -> Result<Baseline, AppError> {
        let candles = self
            .rest
            .get_klines(symbol, "1d", self.history_limit)
            .await?;
        compute_baseline(symbol, &candles, self.span)
    }
}

/// Compute a baseline from daily candles, oldest first. The most recent
/// candle is still open and is excluded from the smoothing; the EMA anchored
/// to the second-to-last (last closed) candle becomes `ema_prev200`.
/// `refreshed_on` is the UTC date the in-progress candle opened.
pub fn compute_baseline(
    symbol: &str,
    candles: &[Candle],
    span: usize,
) -> Result<Baseline, AppError> {
    let need = span + 1;
    if candles.len() < need {
        return Err(AppError::InsufficientHistory {
            symbol: symbol.to_string(),
            got: candles.len(),
            need,
        });
    }

    let mut ema = Ema::new(span);
    for candle in &candles[..candles.len() - 1] {
        ema.push(candle.close);
    }
    let last_closed = &candles[candles.len() - 2];
    let in_progress = &candles[candles.len() - 1];

    let refreshed_on = DateTime::<Utc>::from_timestamp_millis(in_progress.open_time as i64)
        .ok_or_else(|| {
            AppError::MalformedMessage(format!(
                "kline open time {} out of range",
                in_progress.open_time
            ))
        })?
        .date_naive();

    Ok(Baseline {
        // value() is Some: the slice above holds at least `span` candles.
        ema_prev200: ema.value().unwrap_or(last_closed.close),
        prior_close: last_closed.close,
        refreshed_on,
    })
}
