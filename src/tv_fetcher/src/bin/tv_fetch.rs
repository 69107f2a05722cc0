//! Prints the latest bars for one symbol as a JSON array, or `{"error": ...}`.
//!
//! Always exits 0; the payload shape is the only failure signal.

use log::warn;
use tv_fetcher::{
    cli::{self, commands::FetchCli},
    config::{self, SessionSettings},
    errors::FetchError,
    io::payload::Payload,
    models::bar::BarSeries,
    providers, requests,
};

async fn fetch(cli: FetchCli) -> Result<BarSeries, FetchError> {
    let params = config::resolve_bar_fetch(config::env_lookup, cli.into())?;
    let session = SessionSettings::from_lookup(config::env_lookup);
    let connector = providers::build_connector(&session.provider)?;
    requests::run_bars(connector.as_ref(), session.credentials.as_ref(), params).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv = config::load_dotenv();
    cli::init_logging();
    if let Err(e) = dotenv {
        warn!("Ignoring .env: {e}");
    }

    let cli = match cli::parse_args::<FetchCli>() {
        Ok(cli) => cli,
        Err(payload) => return cli::emit(&payload),
    };

    let result = fetch(cli).await;
    cli::emit(&Payload::from_bars(&result));
}
