//! Desktop host for the wristlog watch app.
//!
//! Implements every host service on the PC: the wall clock comes from the
//! local time zone, accelerometer batches are synthesized, logging sessions
//! land in files and the watch face renders through
//! `embedded-graphics-simulator`.

pub mod accel;
pub mod config;
pub mod datalog;
pub mod error;
pub mod host;
pub mod ticker;

pub use config::{DEFAULT_CONFIG_PATH, SimulatorConfig};
pub use error::SimError;
pub use host::SimulatorHost;
