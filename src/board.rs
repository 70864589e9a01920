//! Raspberry Pi wiring: both expanders on one I2C bus.

use anyhow::{Context, Result};
use linux_embedded_hal::{Delay, I2cdev};

use crate::constants::{HDSP_ADDRESS, INPUTS_ADDRESS};
use crate::expander::{Expander, ExpanderPin};
use crate::HDSP211x;

pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

pub type Display = HDSP211x<ExpanderPin<I2cdev>, Delay>;

/// `HDSP_I2C_BUS` overrides the bus device.
pub fn i2c_bus() -> String {
    std::env::var("HDSP_I2C_BUS").unwrap_or_else(|_| DEFAULT_I2C_BUS.to_string())
}

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn open_expander(address: u8) -> Result<Expander<I2cdev>> {
    let bus = i2c_bus();
    let i2c = I2cdev::new(&bus).with_context(|| format!("opening {}", bus))?;
    log::debug!("MCP23017 at 0x{:02x} on {}", address, bus);
    Ok(Expander::new(i2c, address))
}

/// Configure the display lines and blank both displays.
pub fn setup_and_reset() -> Result<Display> {
    let expander = open_expander(HDSP_ADDRESS)?;
    let pins = expander
        .hdsp_pins()
        .context("configuring display pins")?;

    let mut display = HDSP211x::new(pins, Delay);
    display.init().context("resetting display")?;
    Ok(display)
}

pub fn setup_inputs() -> Result<Vec<ExpanderPin<I2cdev>>> {
    let expander = open_expander(INPUTS_ADDRESS)?;
    expander.input_pins().context("configuring input pins")
}
