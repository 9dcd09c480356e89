//! Rolling date window of the schedule

use chrono::{Datelike, Duration, NaiveDate};

/// Consecutive dates starting the Monday of a given week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    first: NaiveDate,
    days: u32,
}

impl ScheduleWindow {
    /// `weeks` whole weeks starting the Monday on or before `today`
    pub fn starting_week_of(today: NaiveDate, weeks: u32) -> Self {
        let back = i64::from(today.weekday().num_days_from_monday());
        Self {
            first: today - Duration::days(back),
            days: weeks * 7,
        }
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    /// Last date of the window (inclusive); equals `first` for an empty window
    pub fn last(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days.saturating_sub(1)))
    }

    pub fn len(&self) -> usize {
        self.days as usize
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.is_empty() && date >= self.first && date <= self.last()
    }

    /// Dates of the window in chronological order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take(self.days as usize)
    }
}
