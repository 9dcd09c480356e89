//! Availability and slot scheduling engine
//!
//! Pure computation over data read from the schedule store: no I/O, no
//! clock access. Callers pass the window and the current instant.

pub mod composer;
pub mod occupancy;
pub mod resolver;
pub mod time_grid;
pub mod weekday;
pub mod window;

use chrono::NaiveTime;
use serde::Serialize;
use utoipa::ToSchema;

pub use composer::{free_slots, grid, DayAvailability, GridCell, GridDay, ScheduleGrid, ScheduleSnapshot};
pub use occupancy::OccupancyIndex;
pub use window::ScheduleWindow;

/// Where the hours of a date come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DaySource {
    Template,
    Override,
}

/// Resolved hours of one concrete date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EffectiveDay {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub slot_minutes: i32,
    pub is_day_off: bool,
    pub source: DaySource,
}
