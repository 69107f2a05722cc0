use std::{fmt, num::NonZeroU32, str::FromStr};

use thiserror::Error;

use crate::models::interval::Interval;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestParamsError {
    #[error("Bar count must be a positive integer, got {0:?}")]
    InvalidBarCount(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Number of bars to request. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarCount(NonZeroU32);

impl BarCount {
    /// Bar count used by `tv-fetch` when `TV_BARS` is unset.
    pub const DEFAULT: BarCount = BarCount(NonZeroU32::new(220).unwrap());

    /// A single bar, used by the last-price lookup.
    pub const ONE: BarCount = BarCount(NonZeroU32::MIN);

    /// The data feed never returns more than this many bars per request.
    pub const MAX: u32 = 5000;

    pub fn new(count: u32) -> Result<Self, RequestParamsError> {
        NonZeroU32::new(count)
            .map(BarCount)
            .ok_or_else(|| RequestParamsError::InvalidBarCount(count.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Caps the count at [`BarCount::MAX`], returning whether it was reduced.
    pub fn clamped(self) -> (Self, bool) {
        match NonZeroU32::new(Self::MAX) {
            Some(max) if self.0 > max => (BarCount(max), true),
            _ => (self, false),
        }
    }
}

impl Default for BarCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BarCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BarCount {
    type Err = RequestParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .map(BarCount)
            .ok_or_else(|| RequestParamsError::InvalidBarCount(s.to_string()))
    }
}

/// Parameters for a single historical bars request against one symbol.
///
/// Construct through [`BarsRequestParams::new`], which trims and validates
/// the symbol and exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct BarsRequestParams {
    /// Ticker symbol as the exchange lists it (e.g. `BTCUSDT`).
    pub symbol: String,

    /// Exchange identifier (e.g. `BINANCE`, `NASDAQ`).
    pub exchange: String,

    /// The time interval for each bar.
    pub interval: Interval,

    /// How many of the most recent bars to request.
    pub n_bars: BarCount,
}

impl BarsRequestParams {
    pub fn new(
        symbol: &str,
        exchange: &str,
        interval: Interval,
        n_bars: BarCount,
    ) -> Result<Self, RequestParamsError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(RequestParamsError::EmptyField { field: "symbol" });
        }
        let exchange = exchange.trim();
        if exchange.is_empty() {
            return Err(RequestParamsError::EmptyField { field: "exchange" });
        }

        Ok(Self {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            interval,
            n_bars,
        })
    }

    /// Provider-qualified symbol, `EXCHANGE:SYMBOL`.
    pub fn qualified_symbol(&self) -> String {
        format!("{}:{}", self.exchange, self.symbol)
    }
}
