//! Fetch TradingView OHLC bars and last prices and render them as JSON.
//!
//! The crate is organized bottom-up:
//! - [`models`]: bars, intervals and request parameters
//! - [`providers`]: the [`DataProvider`](providers::DataProvider) seam, session
//!   acquisition and the `tvDatafeed` binding (feature `tvdatafeed`)
//! - [`requests`]: one request from session to typed result
//! - [`config`]: environment and argument resolution for the binaries
//! - [`io`]: JSON payloads and the debug table

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod io;
pub mod models;
pub mod providers;
pub mod requests;
