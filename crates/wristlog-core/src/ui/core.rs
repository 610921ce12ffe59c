//! Retained-mode drawing contract shared by the window and its layers

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// An element of the watch face that remembers whether it changed.
///
/// Hosts render only when something reports dirty, then call
/// [`mark_clean`](Self::mark_clean).
pub trait Drawable {
    /// Render into `display`, staying inside [`bounds`](Self::bounds).
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    fn bounds(&self) -> Rectangle;

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    /// Force a redraw on the next frame.
    fn mark_dirty(&mut self);
}
