//! Single-line text layer

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::ui::core::Drawable;
use crate::ui::styling::Style;

/// Maximum characters a text layer holds.
pub const TEXT_LAYER_CAPACITY: usize = 16;

/// Font size presets
///
/// - `Small`: 6x10
/// - `Medium`: 7x13 bold
/// - `Large`: 9x18 bold, used for the clock digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &ascii::FONT_6X10,
            TextSize::Medium => &ascii::FONT_7X13_BOLD,
            TextSize::Large => &ascii::FONT_9X18_BOLD,
        }
    }
}

/// A rectangular region showing one line of text.
///
/// The layer keeps its own copy of the text, so the caller's buffer can be
/// reused as soon as `set_text` returns. Text longer than
/// [`TEXT_LAYER_CAPACITY`] is truncated.
pub struct TextLayer {
    bounds: Rectangle,
    text: heapless::String<TEXT_LAYER_CAPACITY>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextLayer {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            text: heapless::String::new(),
            size: TextSize::Small,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_size(mut self, size: TextSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the displayed text. Marks the layer dirty if it changed.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }

        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }

    fn text_position(&self) -> Point {
        let top = self.bounds.top_left.y;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x, top),
            Alignment::Center => Point::new(self.bounds.center().x, top),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32 - 1,
                top,
            ),
        }
    }
}

impl Drawable for TextLayer {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if let Some(background) = self.style.background_color {
            self.bounds
                .into_styled(PrimitiveStyle::with_fill(background))
                .draw(display)?;
        }

        let character_style = MonoTextStyle::new(self.size.font(), self.style.foreground_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(&self.text, self.text_position(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
