//! Push buttons on port B of the second expander. The buttons pull their
//! line low when pressed.

use embedded_hal::digital::InputPin;

use crate::constants::HALF_WIDTH;

pub const NO_INPUT: &[u8; HALF_WIDTH as usize] = b"No input";

/// Index of the first pressed button, lowest index winning.
pub fn first_active<P: InputPin>(pins: &mut [P]) -> Result<Option<usize>, P::Error> {
    for (index, pin) in pins.iter_mut().enumerate() {
        if pin.is_low()? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// `GPBn` padded to the width of one display.
pub fn input_label(index: usize) -> [u8; HALF_WIDTH as usize] {
    let mut label = *b"GPB0    ";
    label[3] = b'0' + (index % 10) as u8;
    label
}
