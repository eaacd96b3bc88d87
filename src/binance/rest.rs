use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::error::AppError;
use crate::model::candle::Candle;

use super::types::{BinanceApiErrorResponse, ExchangeInfo, KlineRow};

pub struct BinanceRestClient {
    http: reqwest::Client,
    base_url: String,
    // Simple rate limiter: request count in current minute window
    request_count: AtomicU64,
    window_start: std::sync::Mutex<Instant>,
}

impl BinanceRestClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            request_count: AtomicU64::new(0),
            window_start: std::sync::Mutex::new(Instant::now()),
        })
    }

    fn check_rate_limit(&self) {
        let mut start = self.window_start.lock().unwrap();
        if start.elapsed().as_secs() >= 60 {
            *start = Instant::now();
            self.request_count.store(0, Ordering::Relaxed);
        }
        let count = self.request_count.fetch_add(1, Ordering::Relaxed);
        if count > 960 {
            tracing::warn!(count, "Approaching rate limit (80% of 1200/min)");
        }
    }

    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/api/v3/ping", self.base_url);
        self.http
            .get(&url)
            .send()
            .await
            .context("ping failed")?
            .error_for_status()
            .context("ping returned error status")?;
        Ok(())
    }

    /// Fetch up to `limit` klines for `symbol`, oldest first. The last row is
    /// the current, still-open candle.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, AppError> {
        self.check_rate_limit();

        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol.to_ascii_uppercase(),
            interval,
            limit
        );

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<BinanceApiErrorResponse>(&body) {
                return Err(AppError::BinanceApi {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(AppError::MalformedMessage(format!(
                "klines request failed: {}",
                body
            )));
        }

        let rows: Vec<KlineRow> = resp.json().await?;
        Ok(rows.iter().map(KlineRow::to_candle).collect())
    }

    /// Fetch the exchange catalog used to build the symbol universe.
    pub async fn exchange_info(&self) -> Result<ExchangeInfo, AppError> {
        self.check_rate_limit();

        let url = format!("{}/api/v3/exchangeInfo", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<BinanceApiErrorResponse>(&body) {
                return Err(AppError::BinanceApi {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(AppError::MalformedMessage(format!(
                "exchangeInfo request failed: {}",
                body
            )));
        }

        Ok(resp.json().await?)
    }
}
