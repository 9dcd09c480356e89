//! Schedule API endpoints (weekly templates, daily overrides)

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{
        DailyOverride, DailyOverrideQuery, Owner, OwnerQuery, ReplaceWeeklyTemplate,
        UpsertDailyOverride, WeeklyTemplateEntry,
    },
};

// ---- Weekly template ----

/// Get the weekly template of the clinic or of one doctor
#[utoipa::path(
    get,
    path = "/schedules/weekly",
    tag = "schedules",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Weekly template, one entry per configured weekday", body = Vec<WeeklyTemplateEntry>)
    )
)]
pub async fn get_weekly_template(
    State(state): State<crate::AppState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<Vec<WeeklyTemplateEntry>>> {
    let owner = Owner::from_doctor_id(query.doctor_id);
    let entries = state.services.schedules.weekly_template(owner).await?;
    Ok(Json(entries))
}

/// Replace the weekly template (whole week submitted at once)
#[utoipa::path(
    put,
    path = "/schedules/weekly",
    tag = "schedules",
    params(OwnerQuery),
    request_body = ReplaceWeeklyTemplate,
    responses(
        (status = 200, description = "Stored weekly template", body = Vec<WeeklyTemplateEntry>),
        (status = 400, description = "Invalid week", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_weekly_template(
    State(state): State<crate::AppState>,
    Query(query): Query<OwnerQuery>,
    Json(data): Json<ReplaceWeeklyTemplate>,
) -> AppResult<Json<Vec<WeeklyTemplateEntry>>> {
    let owner = Owner::from_doctor_id(query.doctor_id);
    let entries = state.services.schedules.replace_weekly_template(owner, &data).await?;
    Ok(Json(entries))
}

// ---- Daily overrides ----

/// List daily overrides, optionally filtered by date range
#[utoipa::path(
    get,
    path = "/schedules/overrides",
    tag = "schedules",
    params(DailyOverrideQuery),
    responses(
        (status = 200, description = "Daily overrides", body = Vec<DailyOverride>)
    )
)]
pub async fn list_overrides(
    State(state): State<crate::AppState>,
    Query(query): Query<DailyOverrideQuery>,
) -> AppResult<Json<Vec<DailyOverride>>> {
    let owner = Owner::from_doctor_id(query.doctor_id);
    let overrides = state
        .services
        .schedules
        .list_overrides(owner, query.start_date, query.end_date)
        .await?;
    Ok(Json(overrides))
}

/// Create or replace the override of one date
#[utoipa::path(
    put,
    path = "/schedules/overrides",
    tag = "schedules",
    params(OwnerQuery),
    request_body = UpsertDailyOverride,
    responses(
        (status = 200, description = "Stored override", body = DailyOverride),
        (status = 400, description = "Invalid override", body = crate::error::ErrorResponse)
    )
)]
pub async fn upsert_override(
    State(state): State<crate::AppState>,
    Query(query): Query<OwnerQuery>,
    Json(data): Json<UpsertDailyOverride>,
) -> AppResult<Json<DailyOverride>> {
    let owner = Owner::from_doctor_id(query.doctor_id);
    let saved = state.services.schedules.upsert_daily_override(owner, &data).await?;
    Ok(Json(saved))
}
