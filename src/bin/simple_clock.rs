use std::thread;
use std::time::Duration;

use anyhow::Result;
use hdsp211x::{board, shutdown};

// A little under a second so no second is skipped.
const TICK: Duration = Duration::from_millis(950);

fn main() -> Result<()> {
    board::init_logging();
    shutdown::install()?;

    let mut display = board::setup_and_reset()?;

    log::info!("Clock running, Ctrl-C to stop");
    while !shutdown::requested() {
        display.do_clock(true)?;
        thread::sleep(TICK);
    }

    display.reset()?;
    Ok(())
}
