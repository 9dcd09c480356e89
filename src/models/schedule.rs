//! Schedule models (weekly templates, daily overrides)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::scheduling::weekday::is_valid_weekday;

/// Shortest bookable slot, in minutes
pub const MIN_SLOT_MINUTES: i32 = 10;
/// Longest bookable slot, in minutes
pub const MAX_SLOT_MINUTES: i32 = 180;

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// Whose calendar is resolved: the clinic as a whole or one doctor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Clinic,
    Doctor(i32),
}

impl Owner {
    /// Owner from an optional doctor id (absent = clinic)
    pub fn from_doctor_id(doctor_id: Option<i32>) -> Self {
        doctor_id.map_or(Owner::Clinic, Owner::Doctor)
    }

    /// Doctor id column value (NULL for the clinic)
    pub fn doctor_id(&self) -> Option<i32> {
        match self {
            Owner::Clinic => None,
            Owner::Doctor(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Clinic => write!(f, "clinic"),
            Owner::Doctor(id) => write!(f, "doctor {}", id),
        }
    }
}

/// Query parameter selecting a schedule owner
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    /// Doctor ID (omit for the clinic schedule)
    pub doctor_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// WeeklyTemplateEntry
// ---------------------------------------------------------------------------

/// Recurring working hours of one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeeklyTemplateEntry {
    pub id: i32,
    /// Owning doctor (null for the clinic)
    pub doctor_id: Option<i32>,
    /// Day of week (1=Monday, 7=Sunday)
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub is_day_off: bool,
}

/// One weekday of a weekly template submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_working_hours", skip_on_field_errors = false))]
pub struct WeeklyTemplateDay {
    /// Day of week (1=Monday, 7=Sunday)
    #[validate(range(min = 1, max = 7, message = "Weekday must be between 1 (Monday) and 7 (Sunday)"))]
    pub weekday: i16,
    /// Opening time (HH:MM:SS)
    pub start_time: NaiveTime,
    /// Closing time (HH:MM:SS)
    pub end_time: NaiveTime,
    #[validate(range(min = 10, max = 180, message = "Slot duration must be between 10 and 180 minutes"))]
    pub slot_duration_minutes: i32,
    pub is_day_off: bool,
}

/// Whole-week template submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_weekdays"))]
pub struct ReplaceWeeklyTemplate {
    #[validate(length(min = 1, max = 7, message = "A week has between 1 and 7 days"), nested)]
    pub days: Vec<WeeklyTemplateDay>,
}

fn validate_working_hours(day: &WeeklyTemplateDay) -> Result<(), ValidationError> {
    check_working_hours(day.start_time, day.end_time, day.slot_duration_minutes, day.is_day_off)
}

fn validate_distinct_weekdays(week: &ReplaceWeeklyTemplate) -> Result<(), ValidationError> {
    let mut seen = [false; 8];
    for day in week.days.iter().filter(|d| is_valid_weekday(d.weekday)) {
        let idx = day.weekday as usize;
        if seen[idx] {
            let mut err = ValidationError::new("duplicate_weekday");
            err.message = Some("Each weekday may appear only once".into());
            return Err(err);
        }
        seen[idx] = true;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// DailyOverride
// ---------------------------------------------------------------------------

/// Replacement of one calendar date's availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyOverride {
    pub id: i32,
    /// Owning doctor (null for the clinic)
    pub doctor_id: Option<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub is_day_off: bool,
}

/// Create or replace the override of one date
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_override_hours", skip_on_field_errors = false))]
pub struct UpsertDailyOverride {
    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(range(min = 10, max = 180, message = "Slot duration must be between 10 and 180 minutes"))]
    pub slot_duration_minutes: i32,
    pub is_day_off: bool,
}

fn validate_override_hours(data: &UpsertDailyOverride) -> Result<(), ValidationError> {
    check_working_hours(data.start_time, data.end_time, data.slot_duration_minutes, data.is_day_off)
}

/// Query parameters for daily overrides
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DailyOverrideQuery {
    /// Doctor ID (omit for the clinic)
    pub doctor_id: Option<i32>,
    /// Filter overrides from this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Filter overrides until this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

/// A working day must open before it closes and fit at least one slot
fn check_working_hours(
    start: NaiveTime,
    end: NaiveTime,
    slot_minutes: i32,
    is_day_off: bool,
) -> Result<(), ValidationError> {
    if is_day_off {
        return Ok(());
    }
    if start >= end {
        let mut err = ValidationError::new("working_hours");
        err.message = Some("Start time must be before end time".into());
        return Err(err);
    }
    if (end - start).num_minutes() < i64::from(slot_minutes) {
        let mut err = ValidationError::new("slot_duration");
        err.message = Some("Working hours are shorter than one slot".into());
        return Err(err);
    }
    Ok(())
}
