#![cfg_attr(not(feature = "std"), no_std)]

mod constants;
pub mod content;
pub mod inputs;

#[cfg(feature = "std")]
pub mod expander;
#[cfg(feature = "std")]
pub mod ticker;

#[cfg(feature = "linux")]
pub mod board;
#[cfg(feature = "linux")]
pub mod shutdown;

pub use constants::*;
use chrono::{Datelike, Timelike};
use core::fmt;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use num_traits::ToPrimitive;

/// The fifteen output lines shared by both displays.
pub struct Pins<P> {
    pub data: [P; DATA_LINES],       // D0-D6
    pub address: [P; ADDRESS_LINES], // A0-A2
    pub ce1: P,
    pub wr1: P,
    pub ce2: P,
    pub wr2: P,
    pub reset: P,
}

/// Two HDSP-211x displays wired side by side, positions 0-7 on the left
/// unit and 8-15 on the right. The displays hold their own state, nothing
/// is cached here.
pub struct HDSP211x<P, D> {
    pub pins: Pins<P>,
    delay: D,
}

impl<P, E, D> HDSP211x<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    pub fn new(pins: Pins<P>, delay: D) -> Self {
        Self { pins, delay }
    }

    pub fn destroy(self) -> (Pins<P>, D) {
        (self.pins, self.delay)
    }

    /// Park the enable and write lines inactive, then blank both displays.
    pub fn init(&mut self) -> Result<(), HDSP211xError<E>> {
        self.pins.ce1.set_high()?;
        self.pins.ce2.set_high()?;
        self.pins.wr1.set_high()?;
        self.pins.wr2.set_high()?;

        self.reset()
    }

    /// Pulse the shared reset line, blanking both displays. Requires `init` to have run.
    pub fn reset(&mut self) -> Result<(), HDSP211xError<E>> {
        self.pins.reset.set_low()?;
        self.pins.reset.set_high()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), HDSP211xError<E>> {
        for position in 0..DISPLAY_WIDTH {
            self.write_character(position, BLANK)?;
        }
        Ok(())
    }

    /// Latch one character. Positions past the right-hand display are ignored
    /// and only the low seven bits of `code` reach the data lines.
    pub fn write_character(&mut self, position: u8, code: u8) -> Result<(), HDSP211xError<E>> {
        if position > MAX_POSITION {
            log::debug!("position {} out of range, write dropped", position);
            return Ok(());
        }

        let pins = &mut self.pins;
        pins.ce1.set_high()?;
        pins.ce2.set_high()?;

        for (bit, line) in pins.address.iter_mut().enumerate() {
            line.set_state(PinState::from(position & ADDRESS_MASK & (1 << bit) != 0))?;
        }
        for (bit, line) in pins.data.iter_mut().enumerate() {
            line.set_state(PinState::from(code & CHARACTER_MASK & (1 << bit) != 0))?;
        }

        let (enable, strobe) = if position & HALF_SELECT != 0 {
            (&mut pins.ce2, &mut pins.wr2)
        } else {
            (&mut pins.ce1, &mut pins.wr1)
        };
        enable.set_low()?;
        strobe.set_low()?;
        strobe.set_high()?;
        enable.set_high()?;

        log::trace!("latched 0x{:02x} at position {}", code & CHARACTER_MASK, position);

        Ok(())
    }

    /// Write `text` from position 0. Text wider than the display is dropped
    /// whole; positions past the end of `text` keep what they showed.
    pub fn write_text(&mut self, text: &str) -> Result<(), HDSP211xError<E>> {
        self.write_bytes(text.as_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), HDSP211xError<E>> {
        if bytes.len() > DISPLAY_WIDTH as usize {
            log::debug!("{} characters do not fit, write dropped", bytes.len());
            return Ok(());
        }
        for (position, &code) in bytes.iter().enumerate() {
            self.write_character(position as u8, code)?;
        }
        Ok(())
    }

    /// Slide a sixteen character window over `text`, one step every
    /// `delay_ms`, ending on the last sixteen characters. Text shorter than
    /// the display produces no steps.
    pub fn scroll_text(&mut self, text: &str, delay_ms: u32) -> Result<(), HDSP211xError<E>> {
        self.scroll_bytes(text.as_bytes(), delay_ms)
    }

    pub fn scroll_bytes(&mut self, bytes: &[u8], delay_ms: u32) -> Result<(), HDSP211xError<E>> {
        self.scroll_bytes_while(bytes, delay_ms, || true)?;
        Ok(())
    }

    /// Like `scroll_bytes`, but checks `keep_going` before every step.
    /// Returns `false` if the scroll was cut short.
    pub fn scroll_bytes_while<F>(
        &mut self,
        bytes: &[u8],
        delay_ms: u32,
        mut keep_going: F,
    ) -> Result<bool, HDSP211xError<E>>
    where
        F: FnMut() -> bool,
    {
        let width = DISPLAY_WIDTH as usize;
        let steps = bytes.len().saturating_sub(MAX_POSITION as usize);

        for window in bytes.windows(width).take(steps) {
            if !keep_going() {
                return Ok(false);
            }
            self.write_bytes(window)?;
            self.delay.delay_ms(delay_ms);
        }
        Ok(true)
    }

    /// Right-aligned decimal across all sixteen positions.
    pub fn display_number<T>(&mut self, number: T) -> Result<(), HDSP211xError<E>>
    where
        T: ToPrimitive,
    {
        let mut num = number.to_u64().ok_or(HDSP211xError::InvalidValue)?;
        if num >= 10u64.pow(DISPLAY_WIDTH as u32) {
            return Err(HDSP211xError::InvalidValue);
        }

        let mut digits = [BLANK; DISPLAY_WIDTH as usize];
        for slot in digits.iter_mut().rev() {
            *slot = b'0' + (num % 10) as u8;
            num /= 10;
            if num == 0 {
                break;
            }
        }
        self.write_bytes(&digits)
    }

    /// Clock on the left display.
    pub fn display_clock<T: Timelike>(&mut self, time: &T, toggle: bool) -> Result<(), HDSP211xError<E>> {
        self.write_frame(0, &content::clock_frame(time, toggle))
    }

    /// Date on the right display.
    pub fn display_date<T: Datelike>(&mut self, date: &T) -> Result<(), HDSP211xError<E>> {
        self.write_frame(HALF_WIDTH, &content::date_frame(date))
    }

    #[cfg(feature = "std")]
    pub fn do_clock(&mut self, toggle: bool) -> Result<(), HDSP211xError<E>> {
        self.display_clock(&chrono::Local::now(), toggle)
    }

    /// Date shifted by a fixed offset from UTC, no daylight saving rules applied.
    #[cfg(feature = "std")]
    pub fn do_date(&mut self) -> Result<(), HDSP211xError<E>> {
        self.do_date_with_offset(DEFAULT_DATE_OFFSET_HOURS)
    }

    #[cfg(feature = "std")]
    pub fn do_date_with_offset(&mut self, offset_hours: i64) -> Result<(), HDSP211xError<E>> {
        let shifted = content::date_at(chrono::Utc::now(), offset_hours)
            .ok_or(HDSP211xError::InvalidValue)?;
        self.display_date(&shifted)
    }

    fn write_frame(&mut self, start: u8, frame: &content::Frame) -> Result<(), HDSP211xError<E>> {
        for (offset, &code) in frame.iter().enumerate() {
            self.write_character(start + offset as u8, code)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum HDSP211xError<E> {
    PinError(E),
    InvalidValue,
}

impl<E> From<E> for HDSP211xError<E> {
    fn from(error: E) -> Self {
        HDSP211xError::PinError(error)
    }
}

impl<E: fmt::Debug> fmt::Display for HDSP211xError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HDSP211xError::PinError(error) => write!(f, "pin error: {:?}", error),
            HDSP211xError::InvalidValue => write!(f, "value does not fit on the display"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for HDSP211xError<E> {}
