use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use hdsp211x::inputs::{first_active, input_label};
use hdsp211x::ticker::{Ticker, TickerConfig};
use hdsp211x::{board, shutdown};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    board::init_logging();
    shutdown::install()?;

    let display = Arc::new(Mutex::new(board::setup_and_reset()?));
    let mut inputs = board::setup_inputs()?;

    let ticker = Ticker::spawn(display, TickerConfig::default()).context("starting ticker")?;

    log::info!("Showing time and date, press GPB0-GPB7 to override, Ctrl-C to stop");
    while !shutdown::requested() {
        match first_active(&mut inputs)? {
            Some(index) => ticker.overwrite_bytes(&input_label(index))?,
            None => ticker.resume_and_blank()?,
        }
        thread::sleep(POLL_INTERVAL);
    }

    ticker.shutdown()?;
    Ok(())
}
