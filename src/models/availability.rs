//! Availability views returned to staff and patients

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::booking::{Booking, BookingStatus, DoctorSummary};
use crate::scheduling::DaySource;

/// Patient fields shown in a schedule cell
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PatientSummary {
    pub patient_id: Option<i32>,
    /// "Second F.S." short form
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

impl From<&Booking> for PatientSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            patient_id: booking.patient_id,
            name: booking.patient_display_name(),
            birth_date: booking.patient_birth_date,
            gender: booking.patient_gender.clone(),
            phone: booking.patient_phone.clone(),
        }
    }
}

/// Doctor fields shown in clinic-wide cells
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DoctorBrief {
    pub doctor_id: i32,
    pub name: String,
    pub specialty: Option<String>,
}

impl From<&DoctorSummary> for DoctorBrief {
    fn from(doctor: &DoctorSummary) -> Self {
        Self {
            doctor_id: doctor.id,
            name: doctor.display_name(),
            specialty: doctor.specialty.clone(),
        }
    }
}

/// Booking holding a grid cell
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Occupant {
    pub booking_id: i32,
    pub status: BookingStatus,
    pub patient: PatientSummary,
    /// Only filled in clinic-wide grids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<DoctorBrief>,
}

/// Appointment in a list view, with the doctor it is booked with
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppointmentView {
    pub booking_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: BookingStatus,
    pub patient: PatientSummary,
    /// Absent when the doctor row is gone
    pub doctor: Option<DoctorBrief>,
    pub created_at: DateTime<Utc>,
}

impl AppointmentView {
    pub fn new(booking: &Booking, doctor: Option<DoctorBrief>) -> Self {
        Self {
            booking_id: booking.id,
            date: booking.date,
            time: booking.time,
            status: booking.status,
            patient: PatientSummary::from(booking),
            doctor,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Closed,
    Free,
    Occupied,
}

/// One (date, time) cell
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridCellView {
    pub time: NaiveTime,
    pub state: CellState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub occupants: Vec<Occupant>,
}

/// One column of a staff grid
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridDayView {
    pub date: NaiveDate,
    /// "DD.MM.YYYY\n(weekday)"
    pub label: String,
    pub is_day_off: bool,
    /// Where the day's hours come from, absent when the day has no schedule
    pub source: Option<DaySource>,
    /// One cell per entry of the grid's time axis
    pub cells: Vec<GridCellView>,
}

/// Staff-facing schedule grid over the whole window
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScheduleGridView {
    /// Owning doctor, absent for the clinic grid
    pub doctor_id: Option<i32>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Shared time axis
    pub times: Vec<NaiveTime>,
    /// Empty when nothing is configured for the owner
    pub days: Vec<GridDayView>,
}

/// Free slots of one date in the slot picker
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SlotPickerDay {
    pub date: NaiveDate,
    pub label: String,
    pub slots: Vec<NaiveTime>,
}

/// Patient-facing list of bookable slots
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SlotPicker {
    pub doctor_id: i32,
    pub days: Vec<SlotPickerDay>,
}

impl SlotPicker {
    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }
}
