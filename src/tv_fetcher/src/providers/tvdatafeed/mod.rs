//! TradingView through the `tvDatafeed` Python client, embedded with pyo3.
//!
//! The client library owns the websocket protocol, the login flow and the
//! on-disk session cache; this module only constructs clients and converts
//! the returned frame into [`BarSeries`].

pub mod python_init;
pub mod response;

use async_trait::async_trait;
use chrono::Local;
use log::debug;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use secrecy::ExposeSecret;
use snafu::ResultExt;

use crate::models::{bar::BarSeries, request_params::BarsRequestParams};
use crate::providers::{
    ApiSnafu, DataProvider, DecodeSnafu, InternalSnafu, LoginSnafu, ProviderError,
    ProviderInitError, ProviderSettings, RestoreSnafu,
    session::{Credentials, SessionConnector},
};

use self::python_init::{CLIENT_MODULE, init_python};
use self::response::{TvRow, rows_into_bars};

/// Creates `tvDatafeed.TvDatafeed` clients.
pub struct TvDatafeedConnector;

impl TvDatafeedConnector {
    /// Initializes the interpreter and checks that the client library imports.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderInitError> {
        init_python(settings.python_venv.as_deref())?;
        Ok(Self)
    }

    fn create_client(&self, credentials: Option<&Credentials>) -> PyResult<Py<PyAny>> {
        Python::with_gil(|py| {
            let client_cls = py.import(CLIENT_MODULE)?.getattr("TvDatafeed")?;
            let kwargs = PyDict::new(py);
            if let Some(credentials) = credentials {
                kwargs.set_item("username", credentials.username())?;
                kwargs.set_item("password", credentials.password().expose_secret())?;
            }
            Ok(client_cls.call((), Some(&kwargs))?.unbind())
        })
    }
}

impl SessionConnector for TvDatafeedConnector {
    fn restore_session(&self) -> Result<Box<dyn DataProvider>, ProviderInitError> {
        let client = self.create_client(None).map_err(|e| {
            RestoreSnafu {
                message: e.to_string(),
            }
            .build()
        })?;
        Ok(Box::new(TvDatafeedProvider { client }))
    }

    fn login(&self, credentials: &Credentials) -> Result<Box<dyn DataProvider>, ProviderInitError> {
        let client = self.create_client(Some(credentials)).map_err(|e| {
            LoginSnafu {
                message: e.to_string(),
            }
            .build()
        })?;
        Ok(Box::new(TvDatafeedProvider { client }))
    }
}

/// An authenticated `TvDatafeed` client.
pub struct TvDatafeedProvider {
    client: Py<PyAny>,
}

impl TvDatafeedProvider {
    /// Calls `get_hist` and returns the frame as records JSON, or `None` when
    /// the library returned nothing.
    fn get_hist_records(
        &self,
        py: Python<'_>,
        params: &BarsRequestParams,
    ) -> PyResult<Option<String>> {
        let interval = py
            .import(CLIENT_MODULE)?
            .getattr("Interval")?
            .getattr(params.interval.feed_name())?;

        let kwargs = PyDict::new(py);
        kwargs.set_item("symbol", &params.symbol)?;
        kwargs.set_item("exchange", &params.exchange)?;
        kwargs.set_item("interval", interval)?;
        kwargs.set_item("n_bars", params.n_bars.get())?;

        let frame = self
            .client
            .bind(py)
            .call_method("get_hist", (), Some(&kwargs))?;
        if frame.is_none() || frame.getattr("empty")?.extract::<bool>()? {
            return Ok(None);
        }

        let json_kwargs = PyDict::new(py);
        json_kwargs.set_item("orient", "records")?;
        json_kwargs.set_item("date_unit", "ms")?;
        let records = frame
            .call_method0("reset_index")?
            .call_method("to_json", (), Some(&json_kwargs))?
            .extract::<String>()?;
        Ok(Some(records))
    }
}

#[async_trait]
impl DataProvider for TvDatafeedProvider {
    async fn fetch_bars(
        &self,
        params: BarsRequestParams,
    ) -> Result<Option<BarSeries>, ProviderError> {
        debug!(
            "get_hist {} interval={} n_bars={}",
            params.qualified_symbol(),
            params.interval,
            params.n_bars
        );

        let records = Python::with_gil(|py| self.get_hist_records(py, &params)).map_err(|e| {
            ApiSnafu {
                message: e.to_string(),
            }
            .build()
        })?;
        let Some(records) = records else {
            return Ok(None);
        };

        let rows: Vec<TvRow> = serde_json::from_str(&records).context(DecodeSnafu)?;
        let symbol = rows
            .first()
            .map(|row| row.symbol.clone())
            .unwrap_or_else(|| params.qualified_symbol());

        let bars = rows_into_bars(rows, &Local).ok_or_else(|| {
            InternalSnafu {
                message: "bar timestamp out of range",
            }
            .build()
        })?;

        Ok(Some(BarSeries {
            symbol,
            interval: params.interval,
            bars,
        }))
    }
}
