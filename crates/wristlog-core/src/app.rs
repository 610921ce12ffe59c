//! Application lifecycle and error types for wristlog

use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::accel_logger::AccelLogger;
use crate::config::WatchConfig;
use crate::host::{AccelData, AppHandlers, DataLoggingError, Host, TimeUnits, WallClock};
use crate::time_format::{ClockStyle, TimeFormatter};
use crate::ui::Drawable;
use crate::window::ClockWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRunState {
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("data logging session could not be opened: {0}")]
    DataLogging(DataLoggingError),
    #[error("app cannot start from state {0:?}")]
    InvalidState(AppRunState),
}

impl From<DataLoggingError> for AppError {
    fn from(value: DataLoggingError) -> Self {
        AppError::DataLogging(value)
    }
}

/// The watch app's process-lifetime context.
///
/// Owns the single window and the single logging session; the host's
/// callbacks reach them through [`AppHandlers`].
pub struct WatchApp {
    run_state: AppRunState,
    config: WatchConfig,
    window: Option<ClockWindow>,
    logger: Option<AccelLogger>,
    formatter: TimeFormatter,
}

impl WatchApp {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            run_state: AppRunState::Uninitialized,
            config,
            window: None,
            logger: None,
            formatter: TimeFormatter::new(),
        }
    }

    pub fn run_state(&self) -> AppRunState {
        self.run_state
    }

    pub fn window(&self) -> Option<&ClockWindow> {
        self.window.as_ref()
    }

    pub fn logger(&self) -> Option<&AccelLogger> {
        self.logger.as_ref()
    }

    /// Text currently shown on the clock face.
    pub fn displayed_time(&self) -> Option<&str> {
        self.window.as_ref().and_then(ClockWindow::time_text)
    }

    /// `Uninitialized -> Running`.
    ///
    /// If the logging session cannot be opened, everything acquired so far
    /// is released again and the app stays `Uninitialized`.
    pub fn start<H: Host>(&mut self, host: &mut H) -> Result<(), AppError> {
        if self.run_state != AppRunState::Uninitialized {
            return Err(AppError::InvalidState(self.run_state));
        }

        let mut window = ClockWindow::new(host.root_bounds(), host.screen_shape());
        window.load();
        self.window = Some(window);
        host.push_window(true);

        host.tick_subscribe(self.config.tick_units);
        let now = host.now();
        self.update_time(&*host, &now);

        match AccelLogger::open(host, &self.config.log) {
            Ok(logger) => self.logger = Some(logger),
            Err(e) => {
                warn!("Failed to open data-logging session: {}", e);
                host.tick_unsubscribe();
                self.destroy_window(host);
                return Err(e.into());
            }
        }

        host.accel_set_sampling_rate(self.config.accel.sampling_rate);
        host.accel_subscribe(self.config.accel.samples_per_batch);

        self.run_state = AppRunState::Running;
        info!(
            "Watch app running: {} Hz, {} samples per batch",
            self.config.accel.sampling_rate.hz(),
            self.config.accel.samples_per_batch
        );
        Ok(())
    }

    /// `Running -> Terminated`. Does nothing in any other state.
    pub fn terminate<H: Host>(&mut self, host: &mut H) {
        if self.run_state != AppRunState::Running {
            debug!("Terminate ignored in state {:?}", self.run_state);
            return;
        }

        host.accel_unsubscribe();
        host.tick_unsubscribe();

        if let Some(logger) = self.logger.take() {
            logger.close(host);
        }
        self.destroy_window(host);

        self.run_state = AppRunState::Terminated;
        info!("Watch app terminated");
    }

    fn destroy_window<H: Host>(&mut self, host: &mut H) {
        if let Some(mut window) = self.window.take() {
            host.remove_window(true);
            window.unload();
        }
    }

    fn update_time<C: WallClock>(&mut self, clock: &C, time: &NaiveDateTime) {
        let style = ClockStyle::from_24h(clock.clock_is_24h_style());
        let text = self.formatter.format(time, style);

        if let Some(window) = self.window.as_mut() {
            window.set_time_text(text);
        }
    }
}

impl<H: Host> AppHandlers<H> for WatchApp {
    fn on_minute_tick(&mut self, host: &mut H, time: NaiveDateTime, _units_changed: TimeUnits) {
        if self.run_state == AppRunState::Running {
            self.update_time(&*host, &time);
        }
    }

    fn on_accel_data(&mut self, host: &mut H, samples: &[AccelData]) {
        if let Some(logger) = self.logger.as_mut() {
            logger.log_batch(host, samples);
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        match &self.window {
            Some(window) => window.draw(display),
            None => Ok(()),
        }
    }

    fn is_dirty(&self) -> bool {
        self.window.as_ref().is_some_and(Drawable::is_dirty)
    }

    fn mark_clean(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.mark_clean();
        }
    }
}

/// Start the app, hand control to the host's event loop, then tear down.
pub fn run<H: Host>(host: &mut H, config: WatchConfig) -> Result<(), AppError> {
    let mut app = WatchApp::new(config);
    app.start(host)?;
    host.run_event_loop(&mut app);
    app.terminate(host);
    Ok(())
}
