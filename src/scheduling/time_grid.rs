//! Slot start-time generation for one effective day

use chrono::{Duration, NaiveTime};

use super::EffectiveDay;

/// Ordered slot start times of a day, over the half-open range `[start, end)`
#[derive(Debug, Clone)]
pub struct SlotTimes {
    next: Option<NaiveTime>,
    end: NaiveTime,
    step: Duration,
}

impl Iterator for SlotTimes {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        let current = self.next?;
        if current >= self.end {
            self.next = None;
            return None;
        }
        // A non-zero overflow means the step crossed midnight
        let (advanced, wrapped) = current.overflowing_add_signed(self.step);
        self.next = (wrapped == 0).then_some(advanced);
        Some(current)
    }
}

/// Generate the slot grid of an effective day.
///
/// Empty for days off, for `start >= end` and for non-positive slot lengths.
pub fn generate(day: &EffectiveDay) -> SlotTimes {
    let empty = day.is_day_off || day.start >= day.end || day.slot_minutes <= 0;
    SlotTimes {
        next: (!empty).then_some(day.start),
        end: day.end,
        step: Duration::minutes(i64::from(day.slot_minutes)),
    }
}
