use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("insufficient history for {symbol}: got {got} daily candles, need {need}")]
    InsufficientHistory {
        symbol: String,
        got: usize,
        need: usize,
    },

    #[error("binance API error (code {code}): {msg}")]
    BinanceApi { code: i64, msg: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// True for failures worth retrying on a later tick or refresh cycle,
    /// as opposed to data that is simply not there yet.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::BinanceApi { .. } | AppError::WebSocket(_)
        )
    }
}
