//! API handlers for the clinic scheduling REST endpoints

pub mod availability;
pub mod bookings;
pub mod health;
pub mod openapi;
pub mod schedules;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

/// Routes mounted under `/api/v1`
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Schedules
        .route("/schedules/weekly", get(schedules::get_weekly_template))
        .route("/schedules/weekly", put(schedules::replace_weekly_template))
        .route("/schedules/overrides", get(schedules::list_overrides))
        .route("/schedules/overrides", put(schedules::upsert_override))
        // Availability
        .route("/availability/clinic/grid", get(availability::clinic_grid))
        .route("/availability/doctors/:id/grid", get(availability::doctor_grid))
        .route("/availability/doctors/:id/slots", get(availability::slot_picker))
        .route("/doctors/:id/appointments/today", get(availability::doctor_today))
        .route("/patients/:id/appointments/upcoming", get(availability::patient_upcoming))
        // Appointments
        .route("/appointments", post(bookings::create_booking))
        .route("/appointments/unconfirmed", get(availability::pending_confirmation))
        .route("/appointments/:id/status", put(bookings::update_status))
        .route("/appointments/:id/reschedule", put(bookings::reschedule))
        .route("/appointments/:id/cancel", post(bookings::cancel))
        .with_state(state)
}
