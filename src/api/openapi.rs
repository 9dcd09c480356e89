//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, health, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clinic Scheduling API",
        version = "1.0.0",
        description = "Doctor availability, slot grids and appointment booking"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Schedules
        schedules::get_weekly_template,
        schedules::replace_weekly_template,
        schedules::list_overrides,
        schedules::upsert_override,
        // Availability
        availability::clinic_grid,
        availability::doctor_grid,
        availability::slot_picker,
        availability::doctor_today,
        availability::patient_upcoming,
        availability::pending_confirmation,
        // Appointments
        bookings::create_booking,
        bookings::update_status,
        bookings::reschedule,
        bookings::cancel,
    ),
    components(
        schemas(
            // Schedules
            crate::models::schedule::WeeklyTemplateEntry,
            crate::models::schedule::WeeklyTemplateDay,
            crate::models::schedule::ReplaceWeeklyTemplate,
            crate::models::schedule::DailyOverride,
            crate::models::schedule::UpsertDailyOverride,
            // Availability
            crate::models::availability::ScheduleGridView,
            crate::models::availability::GridDayView,
            crate::models::availability::GridCellView,
            crate::models::availability::CellState,
            crate::models::availability::Occupant,
            crate::models::availability::PatientSummary,
            crate::models::availability::DoctorBrief,
            crate::models::availability::AppointmentView,
            crate::models::availability::SlotPicker,
            crate::models::availability::SlotPickerDay,
            crate::scheduling::DaySource,
            // Appointments
            crate::models::booking::Booking,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::RescheduleBooking,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "schedules", description = "Weekly templates and daily overrides"),
        (name = "availability", description = "Schedule grids and bookable slots"),
        (name = "appointments", description = "Appointment booking and lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
