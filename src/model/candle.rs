/// A single kline as returned by the historical candle endpoint.
///
/// The last candle in a klines response is still open; callers that anchor
/// to closed periods must skip it.
#[derive(Debug, Clone, Copy)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub open_time: u64,
    pub close_time: u64,
}
