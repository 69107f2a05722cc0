//! Manual smoke test: pulls 60 one-minute BTCUSDT bars from Binance and
//! prints them as a table. Not meant for scripting; errors abort.

use std::error::Error;

use tv_fetcher::{
    cli,
    config::{self, SessionSettings},
    io::table::render_table,
    models::{
        interval::Interval,
        request_params::{BarCount, BarsRequestParams},
    },
    providers,
};

const SYMBOL: &str = "BTCUSDT";
const EXCHANGE: &str = "BINANCE";
const N_BARS: u32 = 60;
const MAX_ROWS: usize = 200;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    cli::init_logging();

    let session = SessionSettings::from_lookup(config::env_lookup);
    let connector = providers::build_connector(&session.provider)?;
    let provider = connector.restore_session()?;

    let params = BarsRequestParams::new(
        SYMBOL,
        EXCHANGE,
        Interval::Minute1,
        BarCount::new(N_BARS)?,
    )?;
    let series = provider.fetch_bars(params).await?;

    match &series {
        Some(series) => print!("{}", render_table(series, MAX_ROWS)),
        None => println!("None"),
    }
    println!("{}", std::any::type_name_of_val(&series));

    Ok(())
}
