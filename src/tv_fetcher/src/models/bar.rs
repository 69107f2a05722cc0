//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation and the input of the JSON payload writer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::interval::Interval;

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The opening time of this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

/// Represents a complete set of time-series data for a single symbol.
///
/// Bars are kept in the order the provider supplied them, which for
/// TradingView is oldest to newest.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Provider-qualified symbol, e.g. `BINANCE:BTCUSDT`.
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub interval: Interval,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar, if any.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Row-oriented view of the series, one record per bar.
    pub fn records(&self) -> Vec<BarRecord<'_>> {
        self.bars
            .iter()
            .map(|bar| BarRecord {
                timestamp: bar.timestamp,
                symbol: &self.symbol,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            })
            .collect()
    }
}

/// One output row: a bar flattened together with its series symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRecord<'a> {
    pub timestamp: DateTime<Utc>,
    pub symbol: &'a str,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn bar(minute: u32, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 9, minute, 0).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 10.5,
        }
    }

    #[test]
    fn test_records_carry_series_symbol_in_order() {
        let series = BarSeries {
            symbol: "BINANCE:BTCUSDT".to_string(),
            interval: Interval::Minute1,
            bars: vec![bar(30, 100.0), bar(31, 101.0)],
        };

        let records = series.records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.symbol == "BINANCE:BTCUSDT"));
        assert_eq!(records[0].close, 100.0);
        assert_eq!(records[1].close, 101.0);
        assert_eq!(series.last().map(|b| b.close), Some(101.0));
    }

    #[test]
    fn test_record_json_fields() {
        let series = BarSeries {
            symbol: "BINANCE:BTCUSDT".to_string(),
            interval: Interval::Minute1,
            bars: vec![bar(30, 100.0)],
        };

        let value = serde_json::to_value(series.records()).unwrap();
        let row = &value[0];
        assert_eq!(row["timestamp"], "2025-01-02T09:30:00Z");
        assert_eq!(row["symbol"], "BINANCE:BTCUSDT");
        for field in ["open", "high", "low", "close", "volume"] {
            assert!(row[field].is_number(), "missing numeric field {field}");
        }
    }
}
