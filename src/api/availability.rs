//! Availability API endpoints (grids, slot picker, appointment lists)

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        availability::{AppointmentView, ScheduleGridView, SlotPicker},
        booking::Booking,
    },
};

/// Clinic-wide schedule grid for the current window
#[utoipa::path(
    get,
    path = "/availability/clinic/grid",
    tag = "availability",
    responses(
        (status = 200, description = "Clinic grid", body = ScheduleGridView),
        (status = 503, description = "Schedule store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn clinic_grid(State(state): State<crate::AppState>) -> AppResult<Json<ScheduleGridView>> {
    let view = state.services.availability.clinic_grid(Utc::now()).await?;
    Ok(Json(view))
}

/// Schedule grid of one doctor
#[utoipa::path(
    get,
    path = "/availability/doctors/{id}/grid",
    tag = "availability",
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor grid", body = ScheduleGridView),
        (status = 503, description = "Schedule store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn doctor_grid(
    State(state): State<crate::AppState>,
    Path(doctor_id): Path<i32>,
) -> AppResult<Json<ScheduleGridView>> {
    let view = state.services.availability.doctor_grid(doctor_id, Utc::now()).await?;
    Ok(Json(view))
}

/// Free future slots of one doctor, grouped by date
#[utoipa::path(
    get,
    path = "/availability/doctors/{id}/slots",
    tag = "availability",
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Bookable slots", body = SlotPicker),
        (status = 503, description = "Schedule store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn slot_picker(
    State(state): State<crate::AppState>,
    Path(doctor_id): Path<i32>,
) -> AppResult<Json<SlotPicker>> {
    let picker = state.services.availability.slot_picker(doctor_id, Utc::now()).await?;
    Ok(Json(picker))
}

/// Today's appointments of a doctor
#[utoipa::path(
    get,
    path = "/doctors/{id}/appointments/today",
    tag = "appointments",
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Appointments ordered by time", body = Vec<Booking>)
    )
)]
pub async fn doctor_today(
    State(state): State<crate::AppState>,
    Path(doctor_id): Path<i32>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.availability.doctor_today(doctor_id, Utc::now()).await?;
    Ok(Json(bookings))
}

/// Upcoming appointments of a patient
#[utoipa::path(
    get,
    path = "/patients/{id}/appointments/upcoming",
    tag = "appointments",
    params(("id" = i32, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Appointments ordered by date and time", body = Vec<AppointmentView>)
    )
)]
pub async fn patient_upcoming(
    State(state): State<crate::AppState>,
    Path(patient_id): Path<i32>,
) -> AppResult<Json<Vec<AppointmentView>>> {
    let appointments = state.services.availability.patient_upcoming(patient_id, Utc::now()).await?;
    Ok(Json(appointments))
}

/// Appointments waiting for staff confirmation
#[utoipa::path(
    get,
    path = "/appointments/unconfirmed",
    tag = "appointments",
    responses(
        (status = 200, description = "Unconfirmed appointments, earliest slot first", body = Vec<AppointmentView>),
        (status = 503, description = "Schedule store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn pending_confirmation(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AppointmentView>>> {
    let appointments = state.services.availability.pending_confirmation().await?;
    Ok(Json(appointments))
}
