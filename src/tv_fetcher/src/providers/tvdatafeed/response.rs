use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Deserialize;

use crate::models::bar::Bar;

/// One row of the frame returned by `TvDatafeed.get_hist`, after
/// `reset_index().to_json(orient="records", date_unit="ms")`.
///
/// `datetime` is the frame's naive index, which the client library builds in
/// the machine's local time zone. Prices and volume come through as `null`
/// when pandas holds NaN.
#[derive(Deserialize, Debug)]
pub struct TvRow {
    pub datetime: i64,
    pub symbol: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl TvRow {
    fn into_bar(self, timestamp: DateTime<Utc>) -> Bar {
        Bar {
            timestamp,
            open: self.open.unwrap_or(f64::NAN),
            high: self.high.unwrap_or(f64::NAN),
            low: self.low.unwrap_or(f64::NAN),
            close: self.close.unwrap_or(f64::NAN),
            volume: self.volume.unwrap_or(f64::NAN),
        }
    }
}

/// Converts rows, oldest first, whose naive timestamps are wall-clock times
/// in `tz`.
///
/// Returns `None` if a timestamp is outside chrono's range.
pub fn rows_into_bars<Tz: TimeZone>(rows: Vec<TvRow>, tz: &Tz) -> Option<Vec<Bar>> {
    let mut previous = None;
    rows.into_iter()
        .map(|row| {
            let naive = DateTime::from_timestamp_millis(row.datetime)?.naive_utc();
            let timestamp = wall_clock_to_utc(tz, &naive, previous);
            previous = Some(timestamp);
            Some(row.into_bar(timestamp))
        })
        .collect()
}

/// Resolves a wall-clock time in `tz` to UTC.
///
/// Inside the repeated hour of a fall-back transition the first occurrence is
/// used until it would not come after `previous`; from then on the second
/// one is. A time skipped by a spring-forward gap is read with the offset in
/// force at that instant read as UTC.
fn wall_clock_to_utc<Tz: TimeZone>(
    tz: &Tz,
    naive: &NaiveDateTime,
    previous: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(at) => at.with_timezone(&Utc),
        LocalResult::Ambiguous(first, second) => {
            let first = first.with_timezone(&Utc);
            match previous {
                Some(prev) if first <= prev => second.with_timezone(&Utc),
                _ => first,
            }
        }
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(naive).fix();
            (*naive - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono_tz::America::New_York;

    use super::*;

    fn wall_clock_millis(month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn row(datetime: i64) -> TvRow {
        TvRow {
            datetime,
            symbol: "BINANCE:BTCUSDT".to_string(),
            open: Some(1.0),
            high: Some(2.0),
            low: Some(0.5),
            close: Some(1.5),
            volume: Some(3.0),
        }
    }

    #[test]
    fn test_rows_decode_from_records_json() {
        let json = r#"[
            {"datetime": 1735810200000, "symbol": "BINANCE:BTCUSDT",
             "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 42.0},
            {"datetime": 1735810260000, "symbol": "BINANCE:BTCUSDT",
             "open": 1.5, "high": 2.5, "low": 1.0, "close": 2.0, "volume": null}
        ]"#;
        let rows: Vec<TvRow> = serde_json::from_str(json).unwrap();
        let bars = rows_into_bars(rows, &Utc).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 1.5);
        assert!(bars[1].volume.is_nan());
        assert_eq!((bars[1].timestamp - bars[0].timestamp).num_seconds(), 60);
    }

    #[test]
    fn test_null_prices_keep_the_row() {
        let json = r#"[{"datetime": 1735810200000, "symbol": "BINANCE:BTCUSDT",
            "open": null, "high": 2.0, "low": null, "close": 1.5, "volume": 42.0}]"#;
        let rows: Vec<TvRow> = serde_json::from_str(json).unwrap();
        let bars = rows_into_bars(rows, &Utc).unwrap();

        assert_eq!(bars.len(), 1);
        assert!(bars[0].open.is_nan());
        assert!(bars[0].low.is_nan());
        assert_eq!(bars[0].close, 1.5);
    }

    #[test]
    fn test_repeated_hour_stays_in_order() {
        // 2024-11-03: New York falls back from 02:00 EDT to 01:00 EST.
        let rows = vec![
            row(wall_clock_millis(11, 3, 0, 59)),
            row(wall_clock_millis(11, 3, 1, 0)),
            row(wall_clock_millis(11, 3, 1, 59)),
            row(wall_clock_millis(11, 3, 1, 0)),
            row(wall_clock_millis(11, 3, 1, 1)),
            row(wall_clock_millis(11, 3, 2, 0)),
        ];
        let bars = rows_into_bars(rows, &New_York).unwrap();
        let utc: Vec<String> = bars.iter().map(|b| b.timestamp.to_rfc3339()).collect();

        assert_eq!(
            utc,
            [
                "2024-11-03T04:59:00+00:00",
                "2024-11-03T05:00:00+00:00",
                "2024-11-03T05:59:00+00:00",
                "2024-11-03T06:00:00+00:00",
                "2024-11-03T06:01:00+00:00",
                "2024-11-03T07:00:00+00:00",
            ]
        );
        assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_skipped_hour_is_contiguous() {
        // 2024-03-10: New York springs forward from 02:00 EST to 03:00 EDT.
        let rows = vec![
            row(wall_clock_millis(3, 10, 1, 59)),
            row(wall_clock_millis(3, 10, 3, 0)),
        ];
        let bars = rows_into_bars(rows, &New_York).unwrap();

        assert_eq!(bars[0].timestamp.to_rfc3339(), "2024-03-10T06:59:00+00:00");
        assert_eq!((bars[1].timestamp - bars[0].timestamp).num_seconds(), 60);
    }

    #[test]
    fn test_wall_clock_inside_gap_resolves() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let at = wall_clock_to_utc(&New_York, &naive, None);
        assert_eq!(at.to_rfc3339(), "2024-03-10T07:30:00+00:00");
    }
}
