use log::{info, warn};

use crate::errors::FetchError;
use crate::models::{
    bar::BarSeries,
    request_params::{BarCount, BarsRequestParams},
};
use crate::providers::{Credentials, DataProvider, SessionConnector, connect};

/// Fetches the most recent `params.n_bars` bars.
///
/// Counts above [`BarCount::MAX`] are clamped. An absent or empty answer is
/// reported as [`FetchError::NoData`].
pub async fn fetch_bars(
    provider: &dyn DataProvider,
    params: BarsRequestParams,
) -> Result<BarSeries, FetchError> {
    let (n_bars, clamped) = params.n_bars.clamped();
    if clamped {
        warn!(
            "Requested {} bars, the feed returns at most {}",
            params.n_bars,
            BarCount::MAX
        );
    }
    let params = BarsRequestParams { n_bars, ..params };
    let symbol = params.symbol.clone();
    let exchange = params.exchange.clone();

    match provider.fetch_bars(params).await? {
        Some(series) if !series.is_empty() => {
            info!(
                "Fetched {} {} bars for {}",
                series.bars.len(),
                series.interval,
                series.symbol
            );
            Ok(series)
        }
        _ => Err(FetchError::NoData { symbol, exchange }),
    }
}

/// Opens a session through `connector` and fetches bars with it.
pub async fn run_bars(
    connector: &dyn SessionConnector,
    credentials: Option<&Credentials>,
    params: BarsRequestParams,
) -> Result<BarSeries, FetchError> {
    let provider = connect(connector, credentials)?;
    fetch_bars(provider.as_ref(), params).await
}
