//! Settings resolution for the binaries.
//!
//! Everything that reads the process environment or the command line lives
//! here; the request functions only ever see the resolved values. Resolution
//! takes a `lookup` function instead of reading `std::env` directly so tests
//! can feed a plain map.

use std::path::{Path, PathBuf};

use thiserror::Error;

use shared_utils::env::{non_empty, non_empty_var};

use crate::{
    models::{
        interval::Interval,
        request_params::{BarCount, BarsRequestParams, RequestParamsError},
    },
    providers::{Credentials, ProviderSettings},
};

pub const SYMBOL_VAR: &str = "TV_SYMBOL";
pub const EXCHANGE_VAR: &str = "TV_EXCHANGE";
pub const BARS_VAR: &str = "TV_BARS";
pub const USERNAME_VAR: &str = "TV_USERNAME";
pub const PASSWORD_VAR: &str = "TV_PASSWORD";
pub const PYTHON_VENV_VAR: &str = "TV_PYTHON_VENV";

/// Errors related to application configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },

    #[error("{var} is not set and no {position} argument was given")]
    MissingWithArg {
        var: &'static str,
        position: &'static str,
    },

    #[error("Invalid {var}: {source}")]
    InvalidBarCount {
        var: &'static str,
        source: RequestParamsError,
    },

    #[error(transparent)]
    Params(#[from] RequestParamsError),
}

/// Reads the real process environment, treating blank values as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    non_empty_var(name)
}

/// Loads `.env` from the working directory if there is one.
///
/// Parent directories are not searched. Variables already present in the
/// environment win over the file. Returns the path that was loaded, or `None`
/// when no file exists.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    let path = std::env::current_dir()
        .map_err(dotenvy::Error::Io)?
        .join(".env");
    load_dotenv_from(&path)
}

/// Loads one specific dotenv file; a missing file is not an error.
pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Session and provider settings shared by every binary.
#[derive(Debug, Default)]
pub struct SessionSettings {
    /// Fallback login, only present when both username and password are set.
    pub credentials: Option<Credentials>,
    pub provider: ProviderSettings,
}

impl SessionSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| non_empty(lookup(name));
        Self {
            credentials: Credentials::from_parts(get(USERNAME_VAR), get(PASSWORD_VAR)),
            provider: ProviderSettings {
                python_venv: get(PYTHON_VENV_VAR).map(PathBuf::from),
            },
        }
    }
}

/// Positional arguments accepted by the bar fetcher.
#[derive(Debug, Clone, Default)]
pub struct BarFetchArgs {
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub interval: Interval,
}

/// Resolves the bar fetcher's request.
///
/// `TV_SYMBOL`/`TV_EXCHANGE` take precedence over the positional arguments;
/// `TV_BARS` defaults to [`BarCount::DEFAULT`].
pub fn resolve_bar_fetch(
    lookup: impl Fn(&str) -> Option<String>,
    args: BarFetchArgs,
) -> Result<BarsRequestParams, ConfigError> {
    let get = |name: &str| non_empty(lookup(name));

    let symbol = get(SYMBOL_VAR)
        .or_else(|| non_empty(args.symbol))
        .ok_or(ConfigError::MissingWithArg {
            var: SYMBOL_VAR,
            position: "first",
        })?;
    let exchange = get(EXCHANGE_VAR)
        .or_else(|| non_empty(args.exchange))
        .ok_or(ConfigError::MissingWithArg {
            var: EXCHANGE_VAR,
            position: "second",
        })?;
    let n_bars = match get(BARS_VAR) {
        Some(raw) => raw
            .parse::<BarCount>()
            .map_err(|source| ConfigError::InvalidBarCount {
                var: BARS_VAR,
                source,
            })?,
        None => BarCount::DEFAULT,
    };

    Ok(BarsRequestParams::new(
        &symbol,
        &exchange,
        args.interval,
        n_bars,
    )?)
}

/// Symbol and exchange for the last-price lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTarget {
    pub symbol: String,
    pub exchange: String,
}

/// Resolves the last-price fetcher's target. There is no argument fallback.
pub fn resolve_last_price(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PriceTarget, ConfigError> {
    let get = |name: &str| non_empty(lookup(name));
    Ok(PriceTarget {
        symbol: get(SYMBOL_VAR).ok_or(ConfigError::Missing { var: SYMBOL_VAR })?,
        exchange: get(EXCHANGE_VAR).ok_or(ConfigError::Missing { var: EXCHANGE_VAR })?,
    })
}
