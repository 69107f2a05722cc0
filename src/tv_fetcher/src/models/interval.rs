use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Invalid interval: {input} (expected one of 1m, 3m, 5m, 15m, 30m, 45m, 1h, 2h, 3h, 4h, 1d, 1w, 1M)")]
    InvalidInput { input: String },
}

/// Bar granularity supported by the TradingView data feed.
///
/// The fetchers default to [`Interval::Minute1`]; the other variants are only
/// reachable through `tv-fetch --interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    #[default]
    Minute1,
    Minute3,
    Minute5,
    Minute15,
    Minute30,
    Minute45,
    Hour1,
    Hour2,
    Hour3,
    Hour4,
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 13] = [
        Interval::Minute1,
        Interval::Minute3,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Minute45,
        Interval::Hour1,
        Interval::Hour2,
        Interval::Hour3,
        Interval::Hour4,
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
    ];

    /// Attribute name of the matching member on the Python `tvDatafeed.Interval` enum.
    pub fn feed_name(self) -> &'static str {
        match self {
            Interval::Minute1 => "in_1_minute",
            Interval::Minute3 => "in_3_minute",
            Interval::Minute5 => "in_5_minute",
            Interval::Minute15 => "in_15_minute",
            Interval::Minute30 => "in_30_minute",
            Interval::Minute45 => "in_45_minute",
            Interval::Hour1 => "in_1_hour",
            Interval::Hour2 => "in_2_hour",
            Interval::Hour3 => "in_3_hour",
            Interval::Hour4 => "in_4_hour",
            Interval::Daily => "in_daily",
            Interval::Weekly => "in_weekly",
            Interval::Monthly => "in_monthly",
        }
    }

    /// Short label used on the command line and in logs.
    pub fn label(self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute3 => "3m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute45 => "45m",
            Interval::Hour1 => "1h",
            Interval::Hour2 => "2h",
            Interval::Hour3 => "3h",
            Interval::Hour4 => "4h",
            Interval::Daily => "1d",
            Interval::Weekly => "1w",
            Interval::Monthly => "1M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    /// Accepts the short labels plus a few spelled-out aliases.
    ///
    /// `M` is only recognized upper-case (month); everything else is
    /// case-insensitive, so `1m` and `1min` both mean one minute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if matches!(trimmed, "1M" | "M") {
            return Ok(Interval::Monthly);
        }

        let interval = match trimmed.to_lowercase().as_str() {
            "1" | "1m" | "1min" | "1minute" => Interval::Minute1,
            "3" | "3m" | "3min" => Interval::Minute3,
            "5" | "5m" | "5min" => Interval::Minute5,
            "15" | "15m" | "15min" => Interval::Minute15,
            "30" | "30m" | "30min" => Interval::Minute30,
            "45" | "45m" | "45min" => Interval::Minute45,
            "1h" | "60" | "1hour" => Interval::Hour1,
            "2h" | "120" => Interval::Hour2,
            "3h" | "180" => Interval::Hour3,
            "4h" | "240" => Interval::Hour4,
            "1d" | "d" | "day" | "daily" => Interval::Daily,
            "1w" | "w" | "week" | "weekly" => Interval::Weekly,
            "mo" | "month" | "monthly" => Interval::Monthly,
            _ => {
                return Err(IntervalError::InvalidInput {
                    input: s.to_string(),
                });
            }
        };
        Ok(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_minute() {
        assert_eq!(Interval::default(), Interval::Minute1);
        assert_eq!(Interval::default().feed_name(), "in_1_minute");
    }

    #[test]
    fn test_labels_parse_back() {
        for interval in Interval::ALL {
            assert_eq!(interval.label().parse::<Interval>(), Ok(interval));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("1min".parse::<Interval>(), Ok(Interval::Minute1));
        assert_eq!(" 5M ".parse::<Interval>(), Ok(Interval::Minute5));
        assert_eq!("240".parse::<Interval>(), Ok(Interval::Hour4));
        assert_eq!("daily".parse::<Interval>(), Ok(Interval::Daily));
        assert_eq!("M".parse::<Interval>(), Ok(Interval::Monthly));
        assert_eq!("month".parse::<Interval>(), Ok(Interval::Monthly));
    }

    #[test]
    fn test_invalid_input() {
        match "7m".parse::<Interval>() {
            Err(IntervalError::InvalidInput { input }) => assert_eq!(input, "7m"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
        assert!("".parse::<Interval>().is_err());
    }
}
