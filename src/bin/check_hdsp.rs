use std::thread;
use std::time::Duration;

use anyhow::Result;
use hdsp211x::{board, shutdown, MAX_POSITION};

const SCROLL_DELAY_MS: u32 = 400;
const SWEEP_DELAY: Duration = Duration::from_millis(25);
const SWEEPS: usize = 9;

// Every code with a glyph, framed by a blank screen on each side.
fn test_message() -> Vec<u8> {
    let control: Vec<u8> = (0x01..0x20).collect();
    let parts: [&[u8]; 8] = [
        b"                ",
        &control,
        b" !\"#$%&'()*+,-./ ",
        b"0123456789 ",
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZ ",
        b"abcdefghijklmnopqrstuvwxyz ",
        b"{|}~\x7f",
        b"                ",
    ];
    parts.concat()
}

// Code 0 shows a left-pointing arrowhead.
fn sweep_left(display: &mut board::Display) -> Result<bool> {
    for code in [0, b' '] {
        for position in (0..=MAX_POSITION).rev() {
            if shutdown::requested() {
                return Ok(false);
            }
            display.write_character(position, code)?;
            thread::sleep(SWEEP_DELAY);
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    board::init_logging();
    shutdown::install()?;

    let mut display = board::setup_and_reset()?;

    log::info!("Scrolling test message...");
    let message = test_message();
    if display.scroll_bytes_while(&message, SCROLL_DELAY_MS, || !shutdown::requested())? {
        log::info!("Sweeping arrowheads...");
        for _ in 0..SWEEPS {
            if !sweep_left(&mut display)? {
                break;
            }
        }
    }

    display.reset()?;
    Ok(())
}
