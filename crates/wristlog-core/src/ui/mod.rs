//! Minimal UI layer for the clock face
//!
//! - `Drawable` trait with dirty tracking
//! - `TextLayer`, a single-line text region
//! - RGB565 colors and the `Style` builder

pub mod core;
pub mod styling;
pub mod text;

pub use self::core::Drawable;
pub use styling::{COLOR_CLEAR_FACE, COLOR_TIME_TEXT, Style};
pub use text::{TextLayer, TextSize};
