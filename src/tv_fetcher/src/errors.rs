use thiserror::Error;

use crate::{
    config::ConfigError,
    models::request_params::RequestParamsError,
    providers::{ProviderError, ProviderInitError},
};

/// The unified error type for the `tv_fetcher` crate.
///
/// Every variant ends up as the message of an `{"error": ...}` payload; the
/// variants exist for logging and tests, not for callers to branch on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Settings could not be resolved from the environment or arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request parameters failed validation.
    #[error(transparent)]
    Params(#[from] RequestParamsError),

    /// No authenticated client could be created.
    #[error(transparent)]
    Session(#[from] ProviderInitError),

    /// The provider failed while serving the request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider answered with no bars.
    #[error("No data returned for {symbol} on {exchange}")]
    NoData { symbol: String, exchange: String },

    /// The one-bar lookup behind a last price came back empty.
    #[error("No data returned")]
    NoPrice,
}
