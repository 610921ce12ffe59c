//! Clock face time formatting

use core::fmt::Write;

use chrono::Timelike;

/// Longest formatted value ("23:59") plus headroom; never exceeds 7 chars.
pub const TIME_BUFFER_LEN: usize = 8;

/// The user's hour display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    /// "2:05", hours 1 to 12 without a leading zero
    TwelveHour,
    /// "14:05", hours 00 to 23
    TwentyFourHour,
}

impl ClockStyle {
    pub const fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }
}

/// Formats the time into a single buffer that is reused on every call.
///
/// Only one formatted value is live at a time: the text layer copies it
/// before the next tick arrives.
#[derive(Debug, Default)]
pub struct TimeFormatter {
    buffer: heapless::String<TIME_BUFFER_LEN>,
}

impl TimeFormatter {
    pub const fn new() -> Self {
        Self {
            buffer: heapless::String::new(),
        }
    }

    pub fn format<T: Timelike>(&mut self, time: &T, style: ClockStyle) -> &str {
        self.buffer.clear();

        let minute = time.minute();
        match style {
            ClockStyle::TwentyFourHour => {
                write!(self.buffer, "{:02}:{:02}", time.hour(), minute).ok();
            }
            ClockStyle::TwelveHour => {
                let (_, hour) = time.hour12();
                write!(self.buffer, "{}:{:02}", hour, minute).ok();
            }
        }

        &self.buffer
    }
}
