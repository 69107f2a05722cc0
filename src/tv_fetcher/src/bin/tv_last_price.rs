//! Prints `{"price": <close>}` for the latest one-minute bar, or `{"error": ...}`.

use log::warn;
use tv_fetcher::{
    cli::{self, commands::LastPriceCli},
    config::{self, SessionSettings},
    errors::FetchError,
    io::payload::Payload,
    providers, requests,
};

async fn last_price() -> Result<f64, FetchError> {
    let target = config::resolve_last_price(config::env_lookup)?;
    let session = SessionSettings::from_lookup(config::env_lookup);
    let connector = providers::build_connector(&session.provider)?;
    requests::run_last_price(
        connector.as_ref(),
        session.credentials.as_ref(),
        &target.symbol,
        &target.exchange,
    )
    .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv = config::load_dotenv();
    cli::init_logging();
    if let Err(e) = dotenv {
        warn!("Ignoring .env: {e}");
    }

    if let Err(payload) = cli::parse_args::<LastPriceCli>() {
        return cli::emit(&payload);
    }

    cli::emit(&Payload::from_price(last_price().await));
}
