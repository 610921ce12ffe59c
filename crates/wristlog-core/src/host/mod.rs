//! Capability traits for the services the watch OS provides
//!
//! The application never talks to hardware directly. A host (the watch
//! firmware, the desktop simulator, or a test double) implements these
//! traits and owns the event loop; the app registers interest during
//! startup and is then driven through [`AppHandlers`].

mod accel;
mod clock;
mod datalog;
mod window;

pub use accel::{AccelData, AccelService, SamplingRate};
pub use clock::{TickTimerService, TimeUnits, WallClock};
pub use datalog::{DataLogging, DataLoggingError, DataLoggingSessionRef, ItemKind, result_code};
pub use window::{ScreenShape, WindowStack};

use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

/// Callbacks the host dispatches into while its event loop runs.
///
/// The host guarantees serialized dispatch: no two handlers, and no handler
/// and the app's own startup/shutdown code, ever run at the same time.
pub trait AppHandlers<H> {
    /// A subscribed tick unit elapsed.
    fn on_minute_tick(&mut self, host: &mut H, time: NaiveDateTime, units_changed: TimeUnits);

    /// A batch of accelerometer samples, in sensor order.
    fn on_accel_data(&mut self, host: &mut H, samples: &[AccelData]);

    /// Render the visible window.
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Whether anything on screen changed since the last draw.
    fn is_dirty(&self) -> bool;

    /// Called by the host after a successful draw.
    fn mark_clean(&mut self);
}

/// Everything the watch app needs from its environment.
pub trait Host:
    Sized + WindowStack + WallClock + TickTimerService + AccelService + DataLogging
{
    /// Run until the host decides the app should exit.
    ///
    /// Returns control to the caller, which then tears the app down.
    fn run_event_loop<A: AppHandlers<Self>>(&mut self, app: &mut A);
}
