//! Appointment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    error::AppResult,
    models::booking::{Booking, CreateBooking, RescheduleBooking, UpdateBookingStatus},
};

/// Book a free slot
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Appointment created (unconfirmed)", body = Booking),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Slot already taken", body = crate::error::ErrorResponse),
        (status = 422, description = "Not a free slot", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.create_booking(&data, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Change the status of an appointment
#[utoipa::path(
    put,
    path = "/appointments/{id}/status",
    tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Appointment updated", body = Booking),
        (status = 404, description = "Appointment not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Transition not allowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBookingStatus>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.update_booking_status(id, data.status).await?;
    Ok(Json(booking))
}

/// Move an appointment to another free slot of the same doctor
#[utoipa::path(
    put,
    path = "/appointments/{id}/reschedule",
    tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = RescheduleBooking,
    responses(
        (status = 200, description = "Appointment moved", body = Booking),
        (status = 404, description = "Appointment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Slot already taken", body = crate::error::ErrorResponse),
        (status = 422, description = "Not a free slot", body = crate::error::ErrorResponse)
    )
)]
pub async fn reschedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<RescheduleBooking>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.reschedule_booking(id, &data, Utc::now()).await?;
    Ok(Json(booking))
}

/// Cancel an appointment, freeing its slot
#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = Booking),
        (status = 404, description = "Appointment not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Already completed or cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.cancel_booking(id).await?;
    Ok(Json(booking))
}
