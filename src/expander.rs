//! MCP23017 16-bit port expander, handed out one pin at a time so the
//! display driver can treat each line as an ordinary `OutputPin`.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{self, ErrorType, InputPin, OutputPin};
use embedded_hal::i2c::I2c;

use crate::constants::{pin, register};
use crate::Pins;

const PIN_COUNT: u8 = 16;

pub struct Mcp23017<I2C> {
    pub i2c: I2C,
    pub address: u8,
    iodir: u16, // shadow of IODIRA/B, bit set = input
    gppu: u16,
    olat: u16,
}

impl<I2C, E> Mcp23017<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            iodir: 0xFFFF,
            gppu: 0,
            olat: 0,
        }
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    pub fn set_output(&mut self, pin: u8) -> Result<(), ExpanderError<E>> {
        let mask = pin_mask(pin)?;
        self.iodir &= !mask;
        self.write_port(register::IODIRA, self.iodir, pin)
    }

    pub fn set_input(&mut self, pin: u8, pull_up: bool) -> Result<(), ExpanderError<E>> {
        let mask = pin_mask(pin)?;
        self.iodir |= mask;
        self.write_port(register::IODIRA, self.iodir, pin)?;

        if pull_up {
            self.gppu |= mask;
        } else {
            self.gppu &= !mask;
        }
        self.write_port(register::GPPUA, self.gppu, pin)
    }

    pub fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), ExpanderError<E>> {
        let mask = pin_mask(pin)?;
        if high {
            self.olat |= mask;
        } else {
            self.olat &= !mask;
        }
        self.write_port(register::OLATA, self.olat, pin)
    }

    pub fn read_pin(&mut self, pin: u8) -> Result<bool, ExpanderError<E>> {
        let mask = pin_mask(pin)?;
        let port = port_of(pin);
        let value = self.read_register(register::GPIOA + port)?;
        Ok((value as u16) << (8 * port) & mask != 0)
    }

    pub fn is_output_high(&self, pin: u8) -> bool {
        pin < PIN_COUNT && self.olat & (1 << pin) != 0
    }

    // A and B registers sit next to each other in bank 0, so only the byte
    // for the pin's port is written.
    fn write_port(&mut self, register_a: u8, value: u16, pin: u8) -> Result<(), ExpanderError<E>> {
        let port = port_of(pin);
        self.write_register(register_a + port, (value >> (8 * port)) as u8)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, ExpanderError<E>> {
        let mut buffer = [0; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), ExpanderError<E>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }
}

fn pin_mask<E>(pin: u8) -> Result<u16, ExpanderError<E>> {
    if pin >= PIN_COUNT {
        return Err(ExpanderError::InvalidPin(pin));
    }
    Ok(1 << pin)
}

fn port_of(pin: u8) -> u8 {
    pin / 8
}

/// Shared handle to one expander. Cloning is cheap; every clone and every
/// pin drives the same chip.
pub struct Expander<I2C> {
    chip: Arc<Mutex<Mcp23017<I2C>>>,
}

impl<I2C> Clone for Expander<I2C> {
    fn clone(&self) -> Self {
        Self {
            chip: Arc::clone(&self.chip),
        }
    }
}

impl<I2C, E> Expander<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            chip: Arc::new(Mutex::new(Mcp23017::new(i2c, address))),
        }
    }

    pub fn output(&self, pin: u8) -> Result<ExpanderPin<I2C>, ExpanderError<E>> {
        lock(&self.chip).set_output(pin)?;
        Ok(self.pin(pin))
    }

    pub fn input(&self, pin: u8, pull_up: bool) -> Result<ExpanderPin<I2C>, ExpanderError<E>> {
        lock(&self.chip).set_input(pin, pull_up)?;
        Ok(self.pin(pin))
    }

    /// All display lines, as wired to the first expander.
    pub fn hdsp_pins(&self) -> Result<Pins<ExpanderPin<I2C>>, ExpanderError<E>> {
        Ok(Pins {
            data: [
                self.output(pin::D0)?,
                self.output(pin::D1)?,
                self.output(pin::D2)?,
                self.output(pin::D3)?,
                self.output(pin::D4)?,
                self.output(pin::D5)?,
                self.output(pin::D6)?,
            ],
            address: [
                self.output(pin::A0)?,
                self.output(pin::A1)?,
                self.output(pin::A2)?,
            ],
            ce1: self.output(pin::CE1)?,
            wr1: self.output(pin::WR1)?,
            ce2: self.output(pin::CE2)?,
            wr2: self.output(pin::WR2)?,
            reset: self.output(pin::RST)?,
        })
    }

    /// Port B as inputs with the internal pull-ups off; the board pulls them up.
    pub fn input_pins(&self) -> Result<Vec<ExpanderPin<I2C>>, ExpanderError<E>> {
        pin::INPUTS
            .iter()
            .map(|&pin| self.input(pin, false))
            .collect()
    }

    fn pin(&self, pin: u8) -> ExpanderPin<I2C> {
        ExpanderPin {
            chip: Arc::clone(&self.chip),
            pin,
        }
    }
}

pub struct ExpanderPin<I2C> {
    chip: Arc<Mutex<Mcp23017<I2C>>>,
    pin: u8,
}

impl<I2C> ExpanderPin<I2C> {
    pub fn number(&self) -> u8 {
        self.pin
    }
}

impl<I2C: I2c> ErrorType for ExpanderPin<I2C> {
    type Error = ExpanderError<I2C::Error>;
}

impl<I2C: I2c> OutputPin for ExpanderPin<I2C> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        lock(&self.chip).write_pin(self.pin, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        lock(&self.chip).write_pin(self.pin, true)
    }
}

impl<I2C: I2c> InputPin for ExpanderPin<I2C> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        lock(&self.chip).read_pin(self.pin)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Copy, Debug)]
pub enum ExpanderError<E> {
    I2cError(E),
    InvalidPin(u8),
}

impl<E> From<E> for ExpanderError<E> {
    fn from(error: E) -> Self {
        ExpanderError::I2cError(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ExpanderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpanderError::I2cError(error) => write!(f, "i2c error: {:?}", error),
            ExpanderError::InvalidPin(pin) => write!(f, "expander has no pin {}", pin),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for ExpanderError<E> {}

impl<E: fmt::Debug> digital::Error for ExpanderError<E> {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}
