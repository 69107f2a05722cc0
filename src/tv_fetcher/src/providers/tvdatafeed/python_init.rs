use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, error};
use pyo3::Python;
use pyo3::types::PyAnyMethods;

use crate::providers::{InterpreterSnafu, ProviderInitError};

/// Python module that provides the TradingView client.
pub const CLIENT_MODULE: &str = "tvDatafeed";

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Initializes the embedded interpreter once per process.
///
/// Later calls return the outcome of the first one, whatever `venv` they pass.
pub fn init_python(venv: Option<&Path>) -> Result<(), ProviderInitError> {
    let result = INIT.get_or_init(|| {
        let result = try_init_python(venv);
        if let Err(e) = &result {
            error!("Failed to initialize Python: {e}");
        }
        result
    });

    match result {
        Ok(()) => Ok(()),
        Err(message) => InterpreterSnafu {
            message: message.clone(),
        }
        .fail(),
    }
}

fn try_init_python(venv: Option<&Path>) -> Result<(), String> {
    pyo3::prepare_freethreaded_python();
    Python::with_gil(|py| {
        if let Some(venv_path) = venv {
            let site_packages = find_site_packages(&venv_path.join("lib"))?;
            debug!("Adding {} to sys.path", site_packages.display());

            let entry = site_packages.to_string_lossy().into_owned();
            let sys = py.import("sys").map_err(|e| e.to_string())?;
            sys.getattr("path")
                .and_then(|path| path.call_method1("insert", (0, entry)))
                .map_err(|e| format!("Failed to extend sys.path: {e}"))?;
        }

        // Import up front so a missing package fails here, not mid-request.
        py.import(CLIENT_MODULE)
            .map_err(|e| format!("Failed to import {CLIENT_MODULE}: {e}"))?;

        Ok(())
    })
}

fn find_site_packages(lib_dir: &Path) -> Result<PathBuf, String> {
    let entries = fs::read_dir(lib_dir)
        .map_err(|e| format!("Cannot read {}: {e}", lib_dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(folder_name) = path.file_name().and_then(|n| n.to_str()) {
            if folder_name.starts_with("python") {
                let candidate = path.join("site-packages");
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }
    }
    Err(format!(
        "No site-packages folder found under {}",
        lib_dir.display()
    ))
}
