use chrono::{NaiveDateTime, TimeDelta};

use crate::reading::EnergyReading;

/// Inclusive time range used to select a slice of the log.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    /// Inclusive.
    pub from: NaiveDateTime,

    /// Inclusive.
    pub to: NaiveDateTime,
}

impl TimeWindow {
    pub const fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }

    /// Window covering the given duration up to `now`, for the usual
    /// «last hour», «last day», and so on presets.
    pub fn last(duration: TimeDelta, now: NaiveDateTime) -> Self {
        Self { from: now - duration, to: now }
    }

    pub fn contains(self, timestamp: NaiveDateTime) -> bool {
        (self.from <= timestamp) && (timestamp <= self.to)
    }

    /// Keep the readings falling inside the window, preserving their order.
    pub fn filter<'a>(
        self,
        readings: impl IntoIterator<Item = &'a EnergyReading>,
    ) -> Vec<EnergyReading> {
        readings
            .into_iter()
            .filter(|reading| self.contains(reading.timestamp))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::quantity::Kilowatts;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn reading(hour: u32) -> EnergyReading {
        EnergyReading::new(at(hour), "Solar Energy", Kilowatts(100.0))
    }

    #[test]
    fn both_bounds_are_inclusive() {
        let window = TimeWindow::new(at(9), at(11));
        assert!(window.contains(at(9)));
        assert!(window.contains(at(10)));
        assert!(window.contains(at(11)));
        assert!(!window.contains(at(8)));
        assert!(!window.contains(at(12)));
    }

    #[test]
    fn filter_preserves_order_and_is_idempotent() {
        let readings = [reading(8), reading(9), reading(10), reading(11), reading(12)];
        let window = TimeWindow::new(at(9), at(11));

        let filtered = window.filter(&readings);
        assert_eq!(filtered, [reading(9), reading(10), reading(11)]);

        let refiltered = window.filter(&filtered);
        assert_eq!(refiltered, filtered);
    }

    #[test]
    fn last_spans_the_duration_up_to_now() {
        let window = TimeWindow::last(TimeDelta::hours(1), at(12));
        assert_eq!(window, TimeWindow::new(at(11), at(12)));
    }
}
