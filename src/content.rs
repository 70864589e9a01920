//! Fixed eight-character snapshots for the clock (left display) and the
//! date (right display).

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};

use crate::constants::{BLANK, HALF_WIDTH, MONTHS};

pub type Frame = [u8; HALF_WIDTH as usize];

/// `HH:MM:SS`. With `toggle` set the two separators alternate between `:`
/// and `.` on each second, odd seconds showing `:` first.
pub fn clock_frame<T: Timelike>(time: &T, toggle: bool) -> Frame {
    let (hour, minute, second) = (time.hour() as u8, time.minute() as u8, time.second() as u8);

    let (first, second_sep) = match (toggle, second % 2) {
        (false, _) => (b':', b':'),
        (true, 1) => (b':', b'.'),
        (true, _) => (b'.', b':'),
    };

    [
        b'0' + hour / 10,
        b'0' + hour % 10,
        first,
        b'0' + minute / 10,
        b'0' + minute % 10,
        second_sep,
        b'0' + second / 10,
        b'0' + second % 10,
    ]
}

/// `Mon DDss`, e.g. `Oct 18th` or `Mar  1st`.
pub fn date_frame<T: Datelike>(date: &T) -> Frame {
    let month = MONTHS[date.month0() as usize];
    let day = date.day();
    let suffix = ordinal_suffix(day);

    let tens = if day > 9 { b'0' + (day / 10) as u8 } else { BLANK };

    [
        month[0],
        month[1],
        month[2],
        BLANK,
        tens,
        b'0' + (day % 10) as u8,
        suffix[0],
        suffix[1],
    ]
}

pub fn ordinal_suffix(day: u32) -> &'static [u8; 2] {
    match day {
        1 | 21 | 31 => b"st",
        2 | 22 => b"nd",
        3 | 23 => b"rd",
        _ => b"th",
    }
}

/// `utc` shifted by a whole number of hours, `None` if the shift is out of range.
pub fn date_at(utc: DateTime<Utc>, offset_hours: i64) -> Option<DateTime<Utc>> {
    utc.checked_add_signed(TimeDelta::try_hours(offset_hours)?)
}
