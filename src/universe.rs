use std::collections::HashSet;

use crate::binance::rest::BinanceRestClient;
use crate::binance::types::ExchangeInfo;
use crate::error::AppError;

/// The set of symbols eligible for monitoring. O(1) membership, fixed after
/// startup.
#[derive(Debug, Clone, Default)]
pub struct SymbolUniverse {
    symbols: HashSet<String>,
}

impl SymbolUniverse {
    /// Build from an explicit symbol list, normalized to uppercase with
    /// blanks dropped.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { symbols }
    }

    /// Build from an exchange catalog: spot symbols currently trading.
    pub fn from_exchange_info(info: ExchangeInfo) -> Self {
        let symbols = info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING" && s.is_spot_trading_allowed)
            .map(|s| s.symbol)
            .collect();
        Self { symbols }
    }

    /// Fetch the exchange catalog and build the universe from it.
    pub async fn fetch(rest: &BinanceRestClient) -> Result<Self, AppError> {
        Ok(Self::from_exchange_info(rest.exchange_info().await?))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
