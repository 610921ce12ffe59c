use chrono::{Datelike, NaiveDateTime, Timelike};
use wristlog_core::host::TimeUnits;

/// Reports calendar unit changes of the wall clock, minute resolution.
pub struct MinuteTicker {
    subscribed: Option<TimeUnits>,
    last: Option<NaiveDateTime>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self {
            subscribed: None,
            last: None,
        }
    }

    /// Start ticking from `now`; the current minute does not fire.
    pub fn subscribe(&mut self, units: TimeUnits, now: NaiveDateTime) {
        self.subscribed = Some(units);
        self.last = Some(now);
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = None;
        self.last = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.is_some()
    }

    /// Units that changed since the previous poll, if any of them were
    /// subscribed to.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<TimeUnits> {
        let subscribed = self.subscribed?;
        let last = self.last.replace(now)?;

        let changed = changed_units(&last, &now);
        if changed.intersects(subscribed) {
            Some(changed)
        } else {
            None
        }
    }
}

impl Default for MinuteTicker {
    fn default() -> Self {
        Self::new()
    }
}

fn changed_units(last: &NaiveDateTime, now: &NaiveDateTime) -> TimeUnits {
    let mut units = TimeUnits::NONE;

    if last.year() != now.year() {
        units = units | TimeUnits::YEAR;
    }
    if units.intersects(TimeUnits::YEAR) || last.month() != now.month() {
        units = units | TimeUnits::MONTH;
    }
    if units.intersects(TimeUnits::MONTH) || last.day() != now.day() {
        units = units | TimeUnits::DAY;
    }
    if units.intersects(TimeUnits::DAY) || last.hour() != now.hour() {
        units = units | TimeUnits::HOUR;
    }
    if units.intersects(TimeUnits::HOUR) || last.minute() != now.minute() {
        units = units | TimeUnits::MINUTE;
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_fires_once_per_minute_change() {
        let mut ticker = MinuteTicker::new();
        ticker.subscribe(TimeUnits::MINUTE, at(2025, 6, 1, 10, 0, 30));

        assert_eq!(ticker.poll(at(2025, 6, 1, 10, 0, 59)), None);
        assert_eq!(
            ticker.poll(at(2025, 6, 1, 10, 1, 0)),
            Some(TimeUnits::MINUTE)
        );
        assert_eq!(ticker.poll(at(2025, 6, 1, 10, 1, 1)), None);
    }

    #[test]
    fn test_rollover_reports_every_larger_unit() {
        let mut ticker = MinuteTicker::new();
        ticker.subscribe(TimeUnits::MINUTE, at(2025, 12, 31, 23, 59, 59));

        let units = ticker.poll(at(2026, 1, 1, 0, 0, 0)).unwrap();
        assert!(units.contains(
            TimeUnits::MINUTE | TimeUnits::HOUR | TimeUnits::DAY | TimeUnits::MONTH | TimeUnits::YEAR
        ));
    }

    #[test]
    fn test_unsubscribed_units_are_filtered() {
        let mut ticker = MinuteTicker::new();
        ticker.subscribe(TimeUnits::HOUR, at(2025, 6, 1, 10, 0, 0));

        assert_eq!(ticker.poll(at(2025, 6, 1, 10, 1, 0)), None);
        assert_eq!(
            ticker.poll(at(2025, 6, 1, 11, 0, 0)),
            Some(TimeUnits::MINUTE | TimeUnits::HOUR)
        );
    }

    #[test]
    fn test_unsubscribe_stops_ticks() {
        let mut ticker = MinuteTicker::new();
        ticker.subscribe(TimeUnits::MINUTE, at(2025, 6, 1, 10, 0, 0));
        ticker.unsubscribe();
        assert!(!ticker.is_subscribed());
        assert_eq!(ticker.poll(at(2025, 6, 1, 10, 5, 0)), None);
    }
}
