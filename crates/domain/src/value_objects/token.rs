use serde::{Deserialize, Serialize};

/// Token metadata needed for valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Ticker symbol, e.g. `WETH`.
    pub symbol: String,
    /// ERC-20 decimals.
    pub decimals: u8,
    /// Current USD price supplied by the price oracle.
    pub price_usd: f64,
}

impl TokenInfo {
    /// Creates token metadata.
    pub fn new(symbol: impl Into<String>, decimals: u8, price_usd: f64) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            price_usd,
        }
    }

    /// Returns a copy priced at `price_usd`.
    #[must_use]
    pub fn with_price(mut self, price_usd: f64) -> Self {
        self.price_usd = price_usd;
        self
    }
}

/// USD spot prices of a token pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairPrices {
    /// Token0 price in USD.
    pub price0: f64,
    /// Token1 price in USD.
    pub price1: f64,
}

impl PairPrices {
    /// Creates a price pair.
    #[must_use]
    pub fn new(price0: f64, price1: f64) -> Self {
        Self { price0, price1 }
    }

    /// Pool price (token1 per token0) implied by the USD prices.
    #[must_use]
    pub fn pool_price(&self) -> f64 {
        self.price0 / self.price1
    }
}
