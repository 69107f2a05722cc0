//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the interface every data
//! source implements to hand back bar data, and the [`SessionConnector`]
//! trait that produces an authenticated provider from either a cached
//! session or a credential login.
//!
//! The only concrete source is TradingView, reached through its Python client
//! library (`tvDatafeed`) when the crate is built with the `tvdatafeed`
//! feature. See [`build_connector`].
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use tv_fetcher::models::{bar::BarSeries, request_params::BarsRequestParams};
//! use tv_fetcher::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Option<BarSeries>, ProviderError> {
//!         Ok(None)
//!     }
//! }
//! ```

pub mod session;
#[cfg(feature = "tvdatafeed")]
pub mod tvdatafeed;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::BarSeries, request_params::BarsRequestParams};

pub use session::{Credentials, SessionConnector, connect};

/// Trait for fetching time-series bar data from a market data provider.
///
/// `Ok(None)` means the provider answered but had nothing for the request
/// (unknown symbol, no trading yet); callers decide whether that is an error.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the most recent `params.n_bars` bars for one symbol.
    async fn fetch_bars(
        &self,
        params: BarsRequestParams,
    ) -> Result<Option<BarSeries>, ProviderError>;
}

/// Provider-specific settings resolved at the process entry point.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Virtualenv whose site-packages should be visible to the embedded interpreter.
    pub python_venv: Option<std::path::PathBuf>,
}

/// Errors that can occur while creating an authenticated provider.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// The binary was built without any data provider.
    #[snafu(display(
        "TradingView provider unavailable: rebuild with `--features tvdatafeed`"
    ))]
    Unavailable { backtrace: Backtrace },

    /// The embedded Python runtime or the client library could not be loaded.
    #[snafu(display("Failed to initialize the TradingView client library: {message}"))]
    Interpreter {
        message: String,
        backtrace: Backtrace,
    },

    /// No cached session could be restored.
    #[snafu(display("Cached session unavailable: {message}"))]
    Restore {
        message: String,
        backtrace: Backtrace,
    },

    /// Logging in with username and password failed.
    #[snafu(display("Login failed: {message}"))]
    Login {
        message: String,
        backtrace: Backtrace,
    },

    /// The cached session failed and there were no credentials to fall back on.
    #[snafu(display(
        "{restore}; set TV_USERNAME and TV_PASSWORD to log in with credentials"
    ))]
    NoCredentials {
        restore: String,
        backtrace: Backtrace,
    },

    /// Both the cached session and the credential login failed.
    #[snafu(display("{restore}; {login}"))]
    SessionUnavailable {
        restore: String,
        login: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The provider's client library raised an error (network, auth, bad symbol).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider returned rows that could not be decoded into bars.
    #[snafu(display("Failed to decode provider response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}

/// Build the session connector for the provider compiled into this binary.
#[cfg(feature = "tvdatafeed")]
pub fn build_connector(
    settings: &ProviderSettings,
) -> Result<Box<dyn SessionConnector>, ProviderInitError> {
    let connector = tvdatafeed::TvDatafeedConnector::new(settings)?;
    Ok(Box::new(connector))
}

/// Build the session connector for the provider compiled into this binary.
#[cfg(not(feature = "tvdatafeed"))]
pub fn build_connector(
    _settings: &ProviderSettings,
) -> Result<Box<dyn SessionConnector>, ProviderInitError> {
    UnavailableSnafu.fail()
}
