use core::ops::BitOr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Bit mask of calendar units, used both to subscribe to ticks and to
/// report which units changed on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Source of local wall-clock time and the user's display preference.
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;

    /// The user's 12h/24h setting. Not owned by the app; read on every
    /// format operation.
    fn clock_is_24h_style(&self) -> bool;
}

/// Host timer service delivering calendar ticks.
pub trait TickTimerService {
    fn tick_subscribe(&mut self, units: TimeUnits);

    fn tick_unsubscribe(&mut self);
}
