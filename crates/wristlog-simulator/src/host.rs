//! Desktop implementation of the watch host services
//!
//! # Key bindings (`sdl` feature)
//!
//! | Key     | Action                 |
//! |---------|------------------------|
//! | T       | Toggle 12h/24h display |
//! | Q / Esc | Quit                   |
//!
//! Without the `sdl` feature the event loop runs headless for
//! `headless_secs` and then returns.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, Utc};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::SimulatorDisplay;
use log::{debug, error, info};

use wristlog_core::host::{
    AccelService, AppHandlers, DataLogging, DataLoggingError, DataLoggingSessionRef, Host,
    ItemKind, SamplingRate, ScreenShape, TickTimerService, TimeUnits, WallClock, WindowStack,
};
use wristlog_core::ui::COLOR_CLEAR_FACE;

use crate::accel::SyntheticAccelerometer;
use crate::config::SimulatorConfig;
use crate::datalog::FileDataLogging;
use crate::error::SimError;
use crate::ticker::MinuteTicker;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

pub struct SimulatorHost {
    display: SimulatorDisplay<Rgb565>,
    shape: ScreenShape,
    clock_24h: bool,
    window_pushed: bool,
    ticker: MinuteTicker,
    accel: SyntheticAccelerometer,
    datalog: FileDataLogging,
    #[cfg_attr(feature = "sdl", allow(dead_code))]
    run_for: Duration,
    #[cfg_attr(not(feature = "sdl"), allow(dead_code))]
    window_scale: u32,
    frames: u64,
}

impl SimulatorHost {
    pub fn new(config: &SimulatorConfig) -> Result<Self, SimError> {
        Ok(Self {
            display: SimulatorDisplay::new(config.display_size()),
            shape: config.screen,
            clock_24h: config.clock_24h,
            window_pushed: false,
            ticker: MinuteTicker::new(),
            accel: SyntheticAccelerometer::new(),
            datalog: FileDataLogging::new(&config.log_dir)?,
            run_for: Duration::from_secs(config.headless_secs),
            window_scale: config.window_scale,
            frames: 0,
        })
    }

    pub fn datalog(&self) -> &FileDataLogging {
        &self.datalog
    }

    pub fn window_pushed(&self) -> bool {
        self.window_pushed
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Flip the 12h/24h preference and let the app redraw right away.
    pub fn toggle_24h<A: AppHandlers<Self>>(&mut self, app: &mut A) {
        self.clock_24h = !self.clock_24h;
        info!(
            "Clock style: {}",
            if self.clock_24h { "24h" } else { "12h" }
        );
        if self.ticker.is_subscribed() {
            let now = self.now();
            app.on_minute_tick(self, now, TimeUnits::NONE);
        }
    }

    /// Run one iteration of the event loop at the given time.
    ///
    /// `now_ms` is the sensor clock in milliseconds since the Unix epoch.
    pub fn step<A: AppHandlers<Self>>(&mut self, app: &mut A, now: NaiveDateTime, now_ms: u64) {
        if let Some(units) = self.ticker.poll(now) {
            debug!("Tick {:?} at {}", units, now);
            app.on_minute_tick(self, now, units);
        }

        while let Some(batch) = self.accel.poll(now_ms) {
            app.on_accel_data(self, &batch);
        }

        self.render(app);
    }

    fn render<A: AppHandlers<Self>>(&mut self, app: &mut A) {
        if !self.window_pushed || !app.is_dirty() {
            return;
        }

        let _ = self.display.clear(COLOR_CLEAR_FACE);
        if let Err(e) = app.draw(&mut self.display) {
            error!("Draw error: {:?}", e);
        }
        app.mark_clean();
        self.frames += 1;
    }

    fn step_now<A: AppHandlers<Self>>(&mut self, app: &mut A) {
        let now = self.now();
        let now_ms = Utc::now().timestamp_millis().max(0) as u64;
        self.step(app, now, now_ms);
    }

    fn pace(frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
}

impl WindowStack for SimulatorHost {
    fn root_bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.display.size())
    }

    fn screen_shape(&self) -> ScreenShape {
        self.shape
    }

    fn push_window(&mut self, _animated: bool) {
        self.window_pushed = true;
    }

    fn remove_window(&mut self, _animated: bool) {
        self.window_pushed = false;
        let _ = self.display.clear(Rgb565::BLACK);
    }
}

impl WallClock for SimulatorHost {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn clock_is_24h_style(&self) -> bool {
        self.clock_24h
    }
}

impl TickTimerService for SimulatorHost {
    fn tick_subscribe(&mut self, units: TimeUnits) {
        let now = self.now();
        self.ticker.subscribe(units, now);
    }

    fn tick_unsubscribe(&mut self) {
        self.ticker.unsubscribe();
    }
}

impl AccelService for SimulatorHost {
    fn accel_set_sampling_rate(&mut self, rate: SamplingRate) {
        self.accel.set_sampling_rate(rate);
    }

    fn accel_subscribe(&mut self, samples_per_batch: u32) {
        self.accel.subscribe(samples_per_batch);
    }

    fn accel_unsubscribe(&mut self) {
        self.accel.unsubscribe();
    }
}

impl DataLogging for SimulatorHost {
    fn create_session(
        &mut self,
        tag: u32,
        kind: ItemKind,
        item_size: usize,
        persist: bool,
    ) -> Result<DataLoggingSessionRef, DataLoggingError> {
        self.datalog.create_session(tag, kind, item_size, persist)
    }

    fn log(
        &mut self,
        session: DataLoggingSessionRef,
        data: &[u8],
        num_items: u32,
    ) -> Result<(), DataLoggingError> {
        self.datalog.log(session, data, num_items)
    }

    fn finish(&mut self, session: DataLoggingSessionRef) {
        self.datalog.finish(session);
    }
}

#[cfg(not(feature = "sdl"))]
impl Host for SimulatorHost {
    fn run_event_loop<A: AppHandlers<Self>>(&mut self, app: &mut A) {
        info!("Running headless for {}s", self.run_for.as_secs());
        let started = Instant::now();

        loop {
            let frame_start = Instant::now();
            self.step_now(app);

            if started.elapsed() >= self.run_for {
                break;
            }
            Self::pace(frame_start);
        }

        info!("Headless run finished after {} frames", self.frames);
    }
}

#[cfg(feature = "sdl")]
impl Host for SimulatorHost {
    fn run_event_loop<A: AppHandlers<Self>>(&mut self, app: &mut A) {
        use embedded_graphics_simulator::sdl2::Keycode;
        use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window};

        info!("Keys: T=12h/24h  Q=Quit");

        let output_settings = OutputSettingsBuilder::new()
            .scale(self.window_scale)
            .build();
        let mut window = Window::new("Wristlog Simulator", &output_settings);

        // `update()` must run once before `events()`
        self.render(app);
        window.update(&self.display);

        'running: loop {
            let frame_start = Instant::now();

            for event in window.events() {
                match event {
                    SimulatorEvent::Quit => break 'running,
                    SimulatorEvent::KeyDown { keycode, .. } => {
                        if keycode == Keycode::Q || keycode == Keycode::Escape {
                            break 'running;
                        }
                        if keycode == Keycode::T {
                            self.toggle_24h(app);
                        }
                    }
                    _ => {}
                }
            }

            self.step_now(app);
            window.update(&self.display);

            Self::pace(frame_start);
        }

        info!("Simulator window closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::Timelike;

    use wristlog_core::record::Records;
    use wristlog_core::{RECORD_SIZE, WatchApp, WatchConfig};

    fn test_config(name: &str) -> (SimulatorConfig, PathBuf) {
        let dir = std::env::temp_dir().join(format!("wristlog-host-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = SimulatorConfig {
            log_dir: dir.clone(),
            headless_secs: 0,
            ..SimulatorConfig::default()
        };
        (config, dir)
    }

    #[test]
    fn test_steps_deliver_ticks_batches_and_frames() {
        let (config, dir) = test_config("steps");
        let mut host = SimulatorHost::new(&config).unwrap();
        let mut app = WatchApp::new(WatchConfig::default());
        app.start(&mut host).unwrap();
        assert!(host.window_pushed());

        let t0 = host.now();
        host.step(&mut app, t0, 1_000_000);
        assert_eq!(host.frames(), 1, "initial face");

        // 2.4 s at 10 Hz completes the first batch of 25
        host.step(&mut app, t0, 1_002_400);
        assert_eq!(app.logger().map(|l| l.appended()), Some(25));
        assert_eq!(host.frames(), 1, "logging does not redraw");

        host.step(&mut app, t0 + chrono::TimeDelta::minutes(2), 1_002_450);
        assert_eq!(host.frames(), 2);

        app.terminate(&mut host);
        assert!(!host.window_pushed());

        let bytes = std::fs::read(host.datalog().session_path(1)).unwrap();
        assert_eq!(bytes.len(), 25 * RECORD_SIZE);
        let records: Vec<_> = Records::new(&bytes).collect();
        assert_eq!(records[0].timestamp, 1_000_000);
        assert_eq!(records[24].timestamp, 1_002_400);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_toggle_redraws_in_other_style() {
        let (mut config, dir) = test_config("toggle");
        config.clock_24h = true;
        let mut host = SimulatorHost::new(&config).unwrap();
        let mut app = WatchApp::new(WatchConfig::default());
        app.start(&mut host).unwrap();

        let before = app.displayed_time().map(str::to_owned);
        host.toggle_24h(&mut app);
        assert!(!host.clock_is_24h_style());

        // Identical only when the hour reads the same in both styles
        if !(10..=12).contains(&host.now().hour()) {
            assert_ne!(app.displayed_time().map(str::to_owned), before);
        }

        app.terminate(&mut host);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(not(feature = "sdl"))]
    #[test]
    fn test_headless_run_starts_and_tears_down() {
        let (config, dir) = test_config("headless");
        let mut host = SimulatorHost::new(&config).unwrap();

        wristlog_core::run(&mut host, config.watch).unwrap();

        assert!(!host.window_pushed());
        assert!(host.frames() >= 1);
        assert!(host.datalog().session_path(1).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bounds_follow_screen_shape() {
        let (mut config, dir) = test_config("bounds");
        config.screen = ScreenShape::Round;
        let host = SimulatorHost::new(&config).unwrap();

        assert_eq!(host.screen_shape(), ScreenShape::Round);
        assert_eq!(host.root_bounds().size, Size::new(180, 180));

        std::fs::remove_dir_all(&dir).ok();
    }
}
