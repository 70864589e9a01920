use std::thread;
use std::time::Duration;

use anyhow::Result;
use hdsp211x::inputs::{first_active, input_label, NO_INPUT};
use hdsp211x::{board, shutdown};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    board::init_logging();
    shutdown::install()?;

    let mut display = board::setup_and_reset()?;
    let mut inputs = board::setup_inputs()?;

    log::info!("Polling GPB0-GPB7, Ctrl-C to stop");
    while !shutdown::requested() {
        match first_active(&mut inputs)? {
            Some(index) => display.write_bytes(&input_label(index))?,
            None => display.write_bytes(NO_INPUT)?,
        }
        thread::sleep(POLL_INTERVAL);
    }

    display.reset()?;
    Ok(())
}
