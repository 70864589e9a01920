use anyhow::Result;
use hdsp211x::board;

fn main() -> Result<()> {
    board::init_logging();
    board::setup_and_reset()?;
    log::info!("Display blanked");
    Ok(())
}
