//! Synthetic accelerometer
//!
//! Produces a slow wrist-sway pattern around 1 g on the Z axis, sampled at
//! the subscribed rate and delivered in batches like the real sensor.

use log::debug;
use wristlog_core::host::{AccelData, SamplingRate};

/// Milli-g reading for 1 g.
const ONE_G: f64 = 1000.0;

pub struct SyntheticAccelerometer {
    rate: SamplingRate,
    /// Samples per delivered batch; `None` when nobody is subscribed.
    batch_size: Option<usize>,
    pending: Vec<AccelData>,
    /// Timestamp of the next sample to generate, in ms.
    next_sample_ms: Option<u64>,
}

impl SyntheticAccelerometer {
    pub fn new() -> Self {
        Self {
            rate: SamplingRate::default(),
            batch_size: None,
            pending: Vec::new(),
            next_sample_ms: None,
        }
    }

    pub fn set_sampling_rate(&mut self, rate: SamplingRate) {
        self.rate = rate;
    }

    pub fn sampling_rate(&self) -> SamplingRate {
        self.rate
    }

    pub fn is_subscribed(&self) -> bool {
        self.batch_size.is_some()
    }

    pub fn subscribe(&mut self, samples_per_batch: u32) {
        self.batch_size = Some(samples_per_batch.max(1) as usize);
        self.pending.clear();
        self.next_sample_ms = None;
        debug!(
            "Accel subscribed: {} Hz, batches of {}",
            self.rate.hz(),
            samples_per_batch
        );
    }

    /// Stop sampling. A partial batch is discarded.
    pub fn unsubscribe(&mut self) {
        self.batch_size = None;
        self.pending.clear();
        self.next_sample_ms = None;
    }

    /// Generate every sample due up to `now_ms` and return the oldest full
    /// batch, if one is ready.
    pub fn poll(&mut self, now_ms: u64) -> Option<Vec<AccelData>> {
        let batch_size = self.batch_size?;
        let period = self.rate.period_ms();
        let mut next = self.next_sample_ms.unwrap_or(now_ms);

        while next <= now_ms {
            self.pending.push(sample_at(next));
            next += period;
        }
        self.next_sample_ms = Some(next);

        if self.pending.len() >= batch_size {
            Some(self.pending.drain(..batch_size).collect())
        } else {
            None
        }
    }
}

impl Default for SyntheticAccelerometer {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_at(timestamp: u64) -> AccelData {
    let t = timestamp as f64 / 1000.0;

    let x = 250.0 * (t / 1.7).sin() + 40.0 * (t * 3.1).cos();
    let y = 180.0 * (t / 2.3).cos() + 30.0 * (t * 2.7).sin();
    let z = ONE_G - 60.0 * (t / 1.9).sin().abs();

    AccelData::new(timestamp, x as i16, y as i16, z as i16)
}
