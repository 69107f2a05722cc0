//! The JSON documents the fetchers print on stdout.
//!
//! A payload is either a success shape (bar records or a price) or
//! `{"error": "<message>"}`. Callers tell them apart by shape only; the
//! process exit status is the same for both.

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;

use crate::errors::FetchError;
use crate::models::bar::{BarRecord, BarSeries};

/// Message used when an error renders to an empty string.
const FALLBACK_ERROR: &str = "request failed";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Payload<'a> {
    Bars(Vec<BarRecord<'a>>),
    Price { price: f64 },
    Error { error: String },
}

impl<'a> Payload<'a> {
    pub fn from_bars(result: &'a Result<BarSeries, FetchError>) -> Self {
        match result {
            Ok(series) => Payload::Bars(series.records()),
            Err(e) => Payload::error(e),
        }
    }

    pub fn from_price(result: Result<f64, FetchError>) -> Self {
        match result {
            Ok(price) => Payload::Price { price },
            Err(e) => Payload::error(e),
        }
    }

    /// Error payload with a guaranteed non-empty message.
    pub fn error(err: impl Display) -> Self {
        let message = err.to_string();
        let error = if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        Payload::Error { error }
    }

    /// Writes the payload as one line of compact JSON.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        writeln!(out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    use super::*;
    use crate::models::{bar::Bar, interval::Interval};

    fn render(payload: &Payload<'_>) -> Value {
        let mut buf = Vec::new();
        payload.write_to(&mut buf).unwrap();
        assert!(buf.ends_with(b"\n"));
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_bars_render_as_array_of_records() {
        let result = Ok(BarSeries {
            symbol: "BINANCE:BTCUSDT".to_string(),
            interval: Interval::Minute1,
            bars: vec![Bar {
                timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap(),
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                volume: 10.0,
            }],
        });

        let value = render(&Payload::from_bars(&result));
        assert_eq!(
            value,
            json!([{
                "timestamp": "2025-01-02T09:30:00Z",
                "symbol": "BINANCE:BTCUSDT",
                "open": 1.0,
                "high": 2.0,
                "low": 0.5,
                "close": 1.5,
                "volume": 10.0
            }])
        );
    }

    #[test]
    fn test_missing_values_render_as_null() {
        let result = Ok(BarSeries {
            symbol: "BINANCE:BTCUSDT".to_string(),
            interval: Interval::Minute1,
            bars: vec![Bar {
                timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap(),
                open: f64::NAN,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                volume: f64::NAN,
            }],
        });

        let value = render(&Payload::from_bars(&result));
        assert_eq!(value[0]["open"], Value::Null);
        assert_eq!(value[0]["volume"], Value::Null);
        assert_eq!(value[0]["close"], json!(1.5));
    }

    #[test]
    fn test_price_shape() {
        let value = render(&Payload::from_price(Ok(97_000.5)));
        assert_eq!(value, json!({ "price": 97_000.5 }));
    }

    #[test]
    fn test_errors_render_as_error_object() {
        let result: Result<BarSeries, FetchError> = Err(FetchError::NoData {
            symbol: "BTCUSDT".to_string(),
            exchange: "BINANCE".to_string(),
        });
        let payload = Payload::from_bars(&result);
        assert!(matches!(payload, Payload::Error { .. }));
        assert_eq!(
            render(&payload),
            json!({ "error": "No data returned for BTCUSDT on BINANCE" })
        );

        let payload = Payload::from_price(Err(FetchError::NoPrice));
        assert_eq!(render(&payload), json!({ "error": "No data returned" }));
    }

    #[test]
    fn test_blank_error_message_is_replaced() {
        assert_eq!(render(&Payload::error("  ")), json!({ "error": "request failed" }));
    }
}
