use crate::errors::FetchError;
use crate::models::{
    bar::BarSeries,
    interval::Interval,
    request_params::{BarCount, BarsRequestParams},
};
use crate::providers::{Credentials, DataProvider, SessionConnector, connect};

/// Close of the most recent one-minute bar.
pub async fn fetch_last_price(
    provider: &dyn DataProvider,
    symbol: &str,
    exchange: &str,
) -> Result<f64, FetchError> {
    let params = BarsRequestParams::new(symbol, exchange, Interval::Minute1, BarCount::ONE)?;
    let series = provider.fetch_bars(params).await?;

    series
        .as_ref()
        .and_then(BarSeries::last)
        .map(|bar| bar.close)
        .ok_or(FetchError::NoPrice)
}

/// Opens a session through `connector` and looks up the last price with it.
pub async fn run_last_price(
    connector: &dyn SessionConnector,
    credentials: Option<&Credentials>,
    symbol: &str,
    exchange: &str,
) -> Result<f64, FetchError> {
    let provider = connect(connector, credentials)?;
    fetch_last_price(provider.as_ref(), symbol, exchange).await
}
