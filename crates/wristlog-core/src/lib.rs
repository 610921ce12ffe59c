//! Hardware-independent core library for wristlog
//!
//! wristlog is a minimal watch application: a digital clock face that is
//! redrawn once per minute, and an accelerometer logger that forwards every
//! raw sample to a host-managed data-logging session.
//!
//! Everything platform specific (windows, timers, the accelerometer, the
//! logging transport) sits behind the capability traits in [`host`]. The
//! crate is `#![no_std]` so the same code runs on a watch target and on
//! desktop hosts (the simulator and tests).

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod accel_logger;
pub mod app;
pub mod config;
pub mod host;
pub mod record;
pub mod time_format;
pub mod ui;
pub mod window;

pub use app::{AppError, AppRunState, WatchApp, run};
pub use config::WatchConfig;
pub use record::{AccelRecord, RECORD_SIZE};
