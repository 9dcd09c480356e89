//! Repository layer for database operations

pub mod bookings;
pub mod schedules;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        booking::{Booking, BookingStatus, CreateBooking, DoctorSummary},
        schedule::{DailyOverride, Owner, UpsertDailyOverride, WeeklyTemplateDay, WeeklyTemplateEntry},
    },
};

/// Persistence the scheduling services depend on.
///
/// Implementations must reject a second live booking of one doctor for the
/// same (date, time) with `AppError::Conflict`, atomically with the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Weekly template entries of an owner, ordered by weekday
    async fn weekly_template(&self, owner: Owner) -> AppResult<Vec<WeeklyTemplateEntry>>;

    /// Overrides of an owner, optionally bounded to `[from, to]`
    async fn daily_overrides(
        &self,
        owner: Owner,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyOverride>>;

    /// Bookings within `[from, to]`, cancelled included. The clinic owner
    /// covers every doctor.
    async fn bookings(&self, owner: Owner, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Booking>>;

    /// Bookings of a patient dated `from` or later
    async fn patient_bookings(&self, patient_id: i32, from: NaiveDate) -> AppResult<Vec<Booking>>;

    /// Bookings of every doctor in one status, any date
    async fn bookings_with_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>>;

    async fn booking(&self, id: i32) -> AppResult<Booking>;

    /// Doctors among `ids`; unknown ids are skipped
    async fn doctors(&self, ids: &[i32]) -> AppResult<Vec<DoctorSummary>>;

    /// Upsert one entry per submitted weekday, all or nothing
    async fn replace_weekly_template(
        &self,
        owner: Owner,
        days: &[WeeklyTemplateDay],
    ) -> AppResult<Vec<WeeklyTemplateEntry>>;

    async fn upsert_daily_override(&self, owner: Owner, data: &UpsertDailyOverride) -> AppResult<DailyOverride>;

    /// Insert an unconfirmed booking
    async fn insert_booking(&self, data: &CreateBooking) -> AppResult<Booking>;

    async fn update_booking_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking>;

    async fn reschedule_booking(&self, id: i32, date: NaiveDate, time: NaiveTime) -> AppResult<Booking>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn weekly_template(&self, owner: Owner) -> AppResult<Vec<WeeklyTemplateEntry>> {
        self.schedules_weekly_template(owner).await
    }

    async fn daily_overrides(
        &self,
        owner: Owner,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyOverride>> {
        self.schedules_list_overrides(owner, from, to).await
    }

    async fn bookings(&self, owner: Owner, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Booking>> {
        self.bookings_between(owner, from, to).await
    }

    async fn patient_bookings(&self, patient_id: i32, from: NaiveDate) -> AppResult<Vec<Booking>> {
        self.bookings_for_patient(patient_id, from).await
    }

    async fn bookings_with_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        self.bookings_by_status(status).await
    }

    async fn booking(&self, id: i32) -> AppResult<Booking> {
        self.bookings_get_by_id(id).await
    }

    async fn doctors(&self, ids: &[i32]) -> AppResult<Vec<DoctorSummary>> {
        self.bookings_doctors(ids).await
    }

    async fn replace_weekly_template(
        &self,
        owner: Owner,
        days: &[WeeklyTemplateDay],
    ) -> AppResult<Vec<WeeklyTemplateEntry>> {
        self.schedules_replace_week(owner, days).await
    }

    async fn upsert_daily_override(&self, owner: Owner, data: &UpsertDailyOverride) -> AppResult<DailyOverride> {
        self.schedules_upsert_override(owner, data).await
    }

    async fn insert_booking(&self, data: &CreateBooking) -> AppResult<Booking> {
        self.bookings_create(data).await
    }

    async fn update_booking_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        self.bookings_set_status(id, status).await
    }

    async fn reschedule_booking(&self, id: i32, date: NaiveDate, time: NaiveTime) -> AppResult<Booking> {
        self.bookings_move(id, date, time).await
    }
}
