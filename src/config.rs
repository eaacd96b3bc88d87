use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub binance: BinanceConfig,
    pub alert: AlertConfig,
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub universe: UniverseConfig,
    pub logging: LoggingConfig,
    #[serde(skip)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    pub rest_base_url: String,
    pub ws_base_url: String,
    /// Per-request timeout for klines/exchangeInfo fetches, seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Relative distance at or inside which a price counts as touching.
    pub touch_threshold: f64,
    /// Relative distance that re-arms touch alerts after a dwell. Wider
    /// than the touch threshold so oscillation cannot re-trigger.
    pub reset_threshold: f64,
    /// EMA span for the daily baseline.
    pub ema_span: usize,
    /// Daily candles fetched per baseline load; must exceed `ema_span`.
    pub history_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    pub period_secs: u64,
    pub max_symbols_per_cycle: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UniverseConfig {
    /// Explicit watch list. Empty means: take every trading spot symbol
    /// from the exchange catalog at startup.
    #[serde(default)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl UniverseConfig {
    pub fn watch_list(&self) -> Vec<String> {
        let mut out = Vec::new();
        for sym in &self.symbols {
            let s = sym.trim().to_ascii_uppercase();
            if !s.is_empty() && !out.iter().any(|v| v == &s) {
                out.push(s);
            }
        }
        out
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        config.telegram.bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN not set in .env or environment")?;
        config.telegram.chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID not set in .env or environment")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.alert.touch_threshold <= 0.0 {
            bail!("alert.touch_threshold must be > 0");
        }
        if self.alert.reset_threshold < self.alert.touch_threshold {
            bail!("alert.reset_threshold must be >= alert.touch_threshold");
        }
        if self.alert.ema_span == 0 {
            bail!("alert.ema_span must be > 0");
        }
        if self.alert.history_limit <= self.alert.ema_span {
            bail!("alert.history_limit must exceed alert.ema_span");
        }
        if self.refresh.period_secs == 0 {
            bail!("refresh.period_secs must be > 0");
        }
        if self.refresh.max_symbols_per_cycle == 0 {
            bail!("refresh.max_symbols_per_cycle must be > 0");
        }
        Ok(())
    }
}
