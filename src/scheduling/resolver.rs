//! Weekly template and daily override resolution

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{weekday::weekday_number, DaySource, EffectiveDay};
use crate::models::schedule::{DailyOverride, WeeklyTemplateEntry};

/// Recurring week of one owner, keyed by weekday (1=Monday .. 7=Sunday)
#[derive(Debug, Clone, Default)]
pub struct WeeklyTemplate {
    days: HashMap<i16, EffectiveDay>,
}

impl WeeklyTemplate {
    pub fn from_entries(entries: impl IntoIterator<Item = WeeklyTemplateEntry>) -> Self {
        let days = entries
            .into_iter()
            .map(|entry| (entry.weekday, EffectiveDay::from(&entry)))
            .collect();
        Self { days }
    }

    /// Stored hours for a weekday, `None` when that day is not configured
    pub fn resolve(&self, weekday: i16) -> Option<&EffectiveDay> {
        self.days.get(&weekday)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Date-specific replacements of one owner
#[derive(Debug, Clone, Default)]
pub struct OverrideCalendar {
    days: HashMap<NaiveDate, EffectiveDay>,
}

impl OverrideCalendar {
    pub fn from_overrides(overrides: impl IntoIterator<Item = DailyOverride>) -> Self {
        let days = overrides
            .into_iter()
            .map(|o| (o.date, EffectiveDay::from(&o)))
            .collect();
        Self { days }
    }

    /// Override of an exact date, if any
    pub fn resolve(&self, date: NaiveDate) -> Option<&EffectiveDay> {
        self.days.get(&date)
    }

    /// Whether any override falls within `[from, to]`
    pub fn any_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.days.keys().any(|d| *d >= from && *d <= to)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Effective hours of a date: the override when one exists, otherwise the
/// weekly template of its weekday. Once an override exists the template is
/// not consulted.
pub fn resolve_effective_day<'a>(
    date: NaiveDate,
    overrides: &'a OverrideCalendar,
    template: &'a WeeklyTemplate,
) -> Option<&'a EffectiveDay> {
    match overrides.resolve(date) {
        Some(day) => Some(day),
        None => template.resolve(weekday_number(date)),
    }
}

impl From<&WeeklyTemplateEntry> for EffectiveDay {
    fn from(entry: &WeeklyTemplateEntry) -> Self {
        Self {
            start: entry.start_time,
            end: entry.end_time,
            slot_minutes: entry.slot_duration_minutes,
            is_day_off: entry.is_day_off,
            source: DaySource::Template,
        }
    }
}

impl From<&DailyOverride> for EffectiveDay {
    fn from(o: &DailyOverride) -> Self {
        Self {
            start: o.start_time,
            end: o.end_time,
            slot_minutes: o.slot_duration_minutes,
            is_day_off: o.is_day_off,
            source: DaySource::Override,
        }
    }
}
