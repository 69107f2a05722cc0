//! Shared plumbing for the binaries: argument parsing, logging, output.

pub mod commands;

use clap::{Parser, error::ErrorKind};
use log::error;

use crate::io::payload::Payload;

/// Installs `env_logger` on stderr. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
}

/// Parses arguments, turning usage errors into an error payload.
///
/// `--help` and `--version` still print and exit the usual way.
pub fn parse_args<C: Parser>() -> Result<C, Payload<'static>> {
    match C::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(Payload::error(e.render().to_string().trim_end())),
    }
}

/// Prints the payload on stdout. A failed write is logged, never fatal.
pub fn emit(payload: &Payload<'_>) {
    if let Err(e) = payload.write_to(std::io::stdout().lock()) {
        error!("Failed to write output: {e}");
    }
}
