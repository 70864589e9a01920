#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use hdsp211x::{HDSP211x, Pins};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinId {
    D(u8),
    A(u8),
    Ce1,
    Wr1,
    Ce2,
    Wr2,
    Rst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Pin(PinId, bool),
    Delay(u32),
}

/// Every pin transition and delay, in order.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub struct MockPin {
    id: PinId,
    log: Log,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Pin(self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Pin(self.id, true));
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}

pub type MockDisplay = HDSP211x<MockPin, MockDelay>;

pub fn display(log: &Log) -> MockDisplay {
    let pin = |id| MockPin {
        id,
        log: log.clone(),
    };
    let pins = Pins {
        data: [0, 1, 2, 3, 4, 5, 6].map(|bit| pin(PinId::D(bit))),
        address: [0, 1, 2].map(|bit| pin(PinId::A(bit))),
        ce1: pin(PinId::Ce1),
        wr1: pin(PinId::Wr1),
        ce2: pin(PinId::Ce2),
        wr2: pin(PinId::Wr2),
        reset: pin(PinId::Rst),
    };
    HDSP211x::new(pins, MockDelay { log: log.clone() })
}

/// Replay the log and return `(position, code)` for every rising write
/// strobe that happened while its display was enabled.
pub fn latched(events: &[Event]) -> Vec<(u8, u8)> {
    let mut levels: HashMap<PinId, bool> = HashMap::new();
    let mut writes = Vec::new();

    for event in events {
        let Event::Pin(id, high) = *event else {
            continue;
        };
        let previous = levels.insert(id, high);
        let (enable, offset) = match id {
            PinId::Wr1 => (PinId::Ce1, 0),
            PinId::Wr2 => (PinId::Ce2, 8),
            _ => continue,
        };
        if high && previous == Some(false) && levels.get(&enable) == Some(&false) {
            let bits = |line: fn(u8) -> PinId, count: u8| {
                (0..count).fold(0u8, |acc, bit| {
                    if levels.get(&line(bit)) == Some(&true) {
                        acc | 1 << bit
                    } else {
                        acc
                    }
                })
            };
            writes.push((offset + bits(PinId::A, 3), bits(PinId::D, 7)));
        }
    }
    writes
}

/// The sixteen characters on the display after replaying `events` on blank displays.
pub fn screen(events: &[Event]) -> [u8; 16] {
    let mut screen = [b' '; 16];
    for (position, code) in latched(events) {
        screen[position as usize] = code;
    }
    screen
}

pub struct MockInput {
    pub high: bool,
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
