//! Colors and style for the clock face
//!
//! RGB565: red 5 bits, green 6 bits, blue 5 bits.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Window background behind the watch face.
pub const COLOR_CLEAR_FACE: Rgb565 = Rgb565::WHITE;

/// High-contrast time text on the light face.
pub const COLOR_TIME_TEXT: Rgb565 = Rgb565::BLACK;

/// Visual style of a text element
///
/// A `None` background is transparent: only the glyphs are drawn and the
/// window shows through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background_color: Option<Rgb565>,
    pub foreground_color: Rgb565,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: COLOR_TIME_TEXT,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Transparent background.
    pub fn with_clear_background(mut self) -> Self {
        self.background_color = None;
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = color;
        self
    }
}
