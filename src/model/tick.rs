/// One live price observation for a symbol.
#[derive(Debug, Clone)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub timestamp_ms: u64,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, price: f64, timestamp_ms: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timestamp_ms,
        }
    }
}
