//! Appointment (booking) model and related types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Unconfirmed,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Unconfirmed => "unconfirmed",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the booking still holds its slot
    pub fn holds_slot(&self) -> bool {
        *self != BookingStatus::Cancelled
    }

    /// Whether no further transition is allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Unconfirmed, Confirmed)
                | (Unconfirmed, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    /// Check a transition, failing with a business rule violation
    pub fn transition_to(&self, next: BookingStatus) -> AppResult<BookingStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::BusinessRule(format!(
                "Appointment cannot go from {} to {}",
                self, next
            )))
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// Appointment row, with patient contact fields captured at booking time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: Option<i32>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub patient_second_name: String,
    pub patient_first_name: String,
    pub patient_surname: Option<String>,
    pub patient_birth_date: Option<NaiveDate>,
    pub patient_gender: Option<String>,
    pub patient_phone: Option<String>,
}

impl Booking {
    /// "Second F.S." short form used in schedule cells
    pub fn patient_display_name(&self) -> String {
        short_name(
            &self.patient_second_name,
            &self.patient_first_name,
            self.patient_surname.as_deref(),
        )
    }
}

/// New appointment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub doctor_id: i32,
    pub patient_id: Option<i32>,
    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Slot start time (HH:MM:SS)
    pub time: NaiveTime,
    #[validate(length(min = 1, message = "Second name is required"))]
    pub patient_second_name: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub patient_first_name: String,
    pub patient_surname: Option<String>,
    pub patient_birth_date: Option<NaiveDate>,
    pub patient_gender: Option<String>,
    #[validate(length(min = 5, max = 32, message = "Invalid phone number"))]
    pub patient_phone: Option<String>,
}

/// Status change request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Move an appointment to another slot
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RescheduleBooking {
    /// New date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// New slot start time (HH:MM:SS)
    pub time: NaiveTime,
}

// ---------------------------------------------------------------------------
// DoctorSummary
// ---------------------------------------------------------------------------

/// Doctor identity shown in clinic-wide grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DoctorSummary {
    pub id: i32,
    pub second_name: String,
    pub first_name: String,
    pub surname: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorSummary {
    pub fn display_name(&self) -> String {
        short_name(&self.second_name, &self.first_name, self.surname.as_deref())
    }
}

/// Format "Ivanova A.P." from name parts
pub fn short_name(second_name: &str, first_name: &str, surname: Option<&str>) -> String {
    let initial = |s: &str| {
        s.chars()
            .next()
            .map(|c| format!("{}.", c.to_uppercase()))
            .unwrap_or_default()
    };
    format!(
        "{} {}{}",
        second_name,
        initial(first_name),
        surname.map(initial).unwrap_or_default()
    )
}
