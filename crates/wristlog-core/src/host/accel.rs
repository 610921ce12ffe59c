use serde::{Deserialize, Serialize};

/// One raw accelerometer reading as delivered by the host sensor service.
///
/// Axis values are in milli-g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelData {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// The watch vibration motor was running while this sample was taken.
    pub did_vibrate: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl AccelData {
    pub const fn new(timestamp: u64, x: i16, y: i16, z: i16) -> Self {
        Self {
            x,
            y,
            z,
            did_vibrate: false,
            timestamp,
        }
    }
}

/// Sampling rates supported by the accelerometer hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingRate {
    #[default]
    Hz10,
    Hz25,
    Hz50,
    Hz100,
}

impl SamplingRate {
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
        }
    }

    /// Time between two consecutive samples.
    pub const fn period_ms(self) -> u64 {
        1000 / self.hz() as u64
    }
}

/// Host accelerometer service with batched delivery.
pub trait AccelService {
    fn accel_set_sampling_rate(&mut self, rate: SamplingRate);

    /// Start delivering samples in batches of `samples_per_batch`.
    fn accel_subscribe(&mut self, samples_per_batch: u32);

    fn accel_unsubscribe(&mut self);
}
