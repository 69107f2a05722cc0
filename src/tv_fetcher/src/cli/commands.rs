use clap::Parser;

use crate::config::BarFetchArgs;
use crate::models::interval::Interval;

/// Print the latest TradingView bars for a symbol as JSON.
///
/// TV_SYMBOL and TV_EXCHANGE take precedence over the positional arguments.
/// TV_BARS sets the bar count (default 220).
#[derive(Parser, Debug)]
#[command(name = "tv-fetch", author, version, about)]
pub struct FetchCli {
    /// Ticker symbol (e.g. BTCUSDT), used when TV_SYMBOL is unset
    pub symbol: Option<String>,

    /// Exchange (e.g. BINANCE), used when TV_EXCHANGE is unset
    pub exchange: Option<String>,

    /// Bar interval: 1m, 3m, 5m, 15m, 30m, 45m, 1h, 2h, 3h, 4h, 1d, 1w, 1M
    #[arg(long, default_value = "1m")]
    pub interval: Interval,
}

impl From<FetchCli> for BarFetchArgs {
    fn from(cli: FetchCli) -> Self {
        BarFetchArgs {
            symbol: cli.symbol,
            exchange: cli.exchange,
            interval: cli.interval,
        }
    }
}

/// Print the close of the latest one-minute bar for TV_SYMBOL on TV_EXCHANGE as JSON.
#[derive(Parser, Debug)]
#[command(name = "tv-last-price", author, version, about)]
pub struct LastPriceCli {}
