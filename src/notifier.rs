use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;

use crate::alert::AlertEvent;

/// Human-readable alert line for one state-machine event.
pub fn format_alert(symbol: &str, event: AlertEvent, price: f64, ema_now: f64) -> String {
    let action = match event {
        AlertEvent::TouchFromAbove => "touched EMA200 from above",
        AlertEvent::TouchFromBelow => "touched EMA200 from below",
        AlertEvent::CrossUp => "crossed above EMA200",
        AlertEvent::CrossDown => "crossed below EMA200",
    };
    format!("{} {} at {:.4} (EMA200 {:.4})", symbol, action, price, ema_now)
}

/// Fire-and-forget Telegram delivery. A failed send is logged and dropped;
/// alerting is best-effort and a missed message is not retried.
pub struct TelegramNotifier {
    http: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build Telegram HTTP client")?;
        Ok(Self {
            http,
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    pub async fn send(&self, text: &str) -> bool {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );
        let payload = json!({ "chat_id": self.chat_id, "text": text });

        match self.http.post(&url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!(%status, body, "Telegram send rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram send failed");
                false
            }
        }
    }
}
