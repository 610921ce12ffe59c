use serde::{Deserialize, Serialize};

use crate::host::{SamplingRate, TimeUnits};

/// Session tag the off-device sync side looks for.
pub const ACCEL_LOG_TAG: u32 = 1;

/// Samples per accelerometer callback.
pub const SAMPLES_PER_BATCH: u32 = 25;

/// Lifecycle constants for the watch app.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WatchConfig {
    pub log: LogConfig,
    pub accel: AccelConfig,
    /// Tick unit the clock face redraws on.
    pub tick_units: TimeUnits,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            accel: AccelConfig::default(),
            tick_units: TimeUnits::MINUTE,
        }
    }
}

/// Data-logging session parameters. Item kind and size are fixed by
/// [`AccelRecord`](crate::record::AccelRecord).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub tag: u32,
    /// Keep records on the device until synced.
    pub persist: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            tag: ACCEL_LOG_TAG,
            persist: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct AccelConfig {
    pub sampling_rate: SamplingRate,
    pub samples_per_batch: u32,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            sampling_rate: SamplingRate::Hz10,
            samples_per_batch: SAMPLES_PER_BATCH,
        }
    }
}
