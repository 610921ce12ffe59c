//! The clock face window

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;

use crate::host::ScreenShape;
use crate::ui::{COLOR_CLEAR_FACE, COLOR_TIME_TEXT, Drawable, Style, TextLayer, TextSize};

/// Top of the time layer on rectangular screens; leaves room for the status bar.
const TIME_LAYER_TOP_RECT: i32 = 52;
/// Round screens need a little more clearance at the top.
const TIME_LAYER_TOP_ROUND: i32 = 58;
/// One line of large text.
const TIME_LAYER_HEIGHT: u32 = 50;

/// Full-screen window holding the time text layer.
///
/// The layer exists only between [`load`](Self::load) and
/// [`unload`](Self::unload).
pub struct ClockWindow {
    bounds: Rectangle,
    shape: ScreenShape,
    time_layer: Option<TextLayer>,
    dirty: bool,
}

impl ClockWindow {
    pub fn new(bounds: Rectangle, shape: ScreenShape) -> Self {
        Self {
            bounds,
            shape,
            time_layer: None,
            dirty: true,
        }
    }

    /// Create the time layer inside the root bounds.
    pub fn load(&mut self) {
        let top = match self.shape {
            ScreenShape::Rectangular => TIME_LAYER_TOP_RECT,
            ScreenShape::Round => TIME_LAYER_TOP_ROUND,
        };
        let layer_bounds = Rectangle::new(
            self.bounds.top_left + Point::new(0, top),
            Size::new(self.bounds.size.width, TIME_LAYER_HEIGHT),
        );

        let layer = TextLayer::new(layer_bounds)
            .with_size(TextSize::Large)
            .with_alignment(Alignment::Center)
            .with_style(
                Style::new()
                    .with_clear_background()
                    .with_foreground(COLOR_TIME_TEXT),
            );

        self.time_layer = Some(layer);
        self.mark_dirty();
    }

    /// Release the time layer.
    pub fn unload(&mut self) {
        self.time_layer = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.time_layer.is_some()
    }

    pub fn set_time_text(&mut self, text: &str) {
        if let Some(layer) = self.time_layer.as_mut() {
            layer.set_text(text);
        }
    }

    pub fn time_text(&self) -> Option<&str> {
        self.time_layer.as_ref().map(TextLayer::text)
    }

    pub fn time_layer_bounds(&self) -> Option<Rectangle> {
        self.time_layer.as_ref().map(Drawable::bounds)
    }
}

impl Drawable for ClockWindow {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(COLOR_CLEAR_FACE))
            .draw(display)?;

        if let Some(layer) = &self.time_layer {
            layer.draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.time_layer.as_ref().is_some_and(Drawable::is_dirty)
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        if let Some(layer) = self.time_layer.as_mut() {
            layer.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
