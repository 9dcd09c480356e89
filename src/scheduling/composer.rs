//! Availability composition over a schedule window
//!
//! Both entry points walk the window day by day: resolve the effective day
//! (override first, weekly template second), generate its slot grid, then
//! consult the occupancy index. They differ only in presentation:
//!
//! * [`free_slots`] keeps free slots, optionally dropping those before `now`.
//! * [`grid`] keeps every slot and annotates occupied ones with their bookings.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    occupancy::OccupancyIndex,
    resolver::{resolve_effective_day, OverrideCalendar, WeeklyTemplate},
    time_grid::generate,
    window::ScheduleWindow,
    EffectiveDay,
};
use crate::models::{
    booking::Booking,
    schedule::{DailyOverride, WeeklyTemplateEntry},
};

/// Everything the composer reads for one owner and window
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    pub template: WeeklyTemplate,
    pub overrides: OverrideCalendar,
    pub occupancy: OccupancyIndex,
}

impl ScheduleSnapshot {
    pub fn new(
        template: Vec<WeeklyTemplateEntry>,
        overrides: Vec<DailyOverride>,
        bookings: Vec<Booking>,
    ) -> Self {
        Self {
            template: WeeklyTemplate::from_entries(template),
            overrides: OverrideCalendar::from_overrides(overrides),
            occupancy: OccupancyIndex::build(bookings),
        }
    }

    /// No weekly template at all and no override inside the window
    pub fn is_unconfigured(&self, window: &ScheduleWindow) -> bool {
        self.template.is_empty() && !self.overrides.any_between(window.first(), window.last())
    }

    pub fn effective_day(&self, date: NaiveDate) -> Option<&EffectiveDay> {
        resolve_effective_day(date, &self.overrides, &self.template)
    }

    /// Slot start times of a date, empty for closed or unconfigured days
    pub fn slot_times(&self, date: NaiveDate) -> Vec<NaiveTime> {
        self.effective_day(date)
            .map(|day| generate(day).collect())
            .unwrap_or_default()
    }
}

/// Free slots of one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
}

/// Free slots per date of the window, in chronological order.
///
/// Closed days stay in the result with no slots. When `now` is given, slots
/// strictly before it are dropped but their day is kept.
pub fn free_slots(
    snapshot: &ScheduleSnapshot,
    window: &ScheduleWindow,
    now: Option<NaiveDateTime>,
) -> Vec<DayAvailability> {
    if snapshot.is_unconfigured(window) {
        return Vec::new();
    }

    window
        .dates()
        .map(|date| {
            let slots = snapshot
                .slot_times(date)
                .into_iter()
                .filter(|time| !snapshot.occupancy.is_occupied(date, *time))
                .filter(|time| now.map_or(true, |now| date.and_time(*time) >= now))
                .collect();
            DayAvailability { date, slots }
        })
        .collect()
}

/// State of one (date, time) cell of a staff grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    /// The time is not part of that day's schedule
    Closed,
    Free,
    Occupied(Vec<Booking>),
}

static CLOSED: GridCell = GridCell::Closed;

/// One date of a staff grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// Resolved hours, `None` when the day has no schedule
    pub effective: Option<EffectiveDay>,
    /// Cells of the times generated for this date
    pub cells: BTreeMap<NaiveTime, GridCell>,
}

impl GridDay {
    /// Cell at a time of the shared axis; times outside the day are closed
    pub fn cell(&self, time: NaiveTime) -> &GridCell {
        self.cells.get(&time).unwrap_or(&CLOSED)
    }

    pub fn is_closed(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Dates x times matrix for staff views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleGrid {
    pub days: Vec<GridDay>,
    /// Sorted union of every time generated in the window
    pub times: Vec<NaiveTime>,
}

impl ScheduleGrid {
    pub fn day(&self, date: NaiveDate) -> Option<&GridDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.cells.values())
            .filter(|c| matches!(c, GridCell::Occupied(_)))
            .count()
    }
}

/// Full grid of the window, past slots included, occupied slots annotated
pub fn grid(snapshot: &ScheduleSnapshot, window: &ScheduleWindow) -> ScheduleGrid {
    if snapshot.is_unconfigured(window) {
        return ScheduleGrid::default();
    }

    let mut times = BTreeSet::new();
    let days = window
        .dates()
        .map(|date| {
            let effective = snapshot.effective_day(date).cloned();
            let cells: BTreeMap<_, _> = snapshot
                .slot_times(date)
                .into_iter()
                .map(|time| {
                    times.insert(time);
                    let occupants = snapshot.occupancy.occupants(date, time);
                    let cell = if occupants.is_empty() {
                        GridCell::Free
                    } else {
                        GridCell::Occupied(occupants.into_iter().cloned().collect())
                    };
                    (time, cell)
                })
                .collect();
            GridDay { date, effective, cells }
        })
        .collect();

    ScheduleGrid {
        days,
        times: times.into_iter().collect(),
    }
}
