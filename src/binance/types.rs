use serde::Deserialize;

use crate::model::candle::Candle;

/// Deserialize Binance string-encoded numbers to f64.
pub fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

/// One entry of the `!miniTicker@arr` stream payload. The stream delivers
/// an array of these, one per symbol that traded in the last second.
#[derive(Debug, Deserialize)]
pub struct MiniTickerEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c", deserialize_with = "string_to_f64")]
    pub last_price: f64,
}

/// Raw kline row (GET /api/v3/klines). Binance returns a heterogeneous
/// JSON array per candle; only the fields the monitor reads are typed.
#[derive(Debug, Deserialize)]
pub struct KlineRow(
    pub u64, // open time
    #[serde(deserialize_with = "string_to_f64")] pub f64, // open
    #[serde(deserialize_with = "string_to_f64")] pub f64, // high
    #[serde(deserialize_with = "string_to_f64")] pub f64, // low
    #[serde(deserialize_with = "string_to_f64")] pub f64, // close
    pub serde_json::Value, // volume
    pub u64, // close time
    pub serde_json::Value, // quote volume
    pub serde_json::Value, // trade count
    pub serde_json::Value, // taker buy base
    pub serde_json::Value, // taker buy quote
    pub serde_json::Value, // ignored
);

impl KlineRow {
    pub fn to_candle(&self) -> Candle {
        Candle {
            open: self.1,
            high: self.2,
            low: self.3,
            close: self.4,
            open_time: self.0,
            close_time: self.6,
        }
    }
}

/// Binance exchange info response (GET /api/v3/exchangeInfo).
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<ExchangeSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSymbol {
    pub symbol: String,
    pub status: String,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
}

/// Binance API error response.
#[derive(Debug, Deserialize)]
pub struct BinanceApiErrorResponse {
    pub code: i64,
    pub msg: String,
}
