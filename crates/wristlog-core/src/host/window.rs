use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

/// Physical shape of the watch display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenShape {
    #[default]
    Rectangular,
    Round,
}

/// Host window stack (navigation stack of full-screen windows).
pub trait WindowStack {
    /// Bounds of the root layer of a full-screen window.
    fn root_bounds(&self) -> Rectangle;

    fn screen_shape(&self) -> ScreenShape;

    /// Make the app window the top-most window.
    fn push_window(&mut self, animated: bool);

    /// Remove the app window from the stack.
    fn remove_window(&mut self, animated: bool);
}
