//! Appointments domain methods on Repository

use chrono::{NaiveDate, NaiveTime};

use super::Repository;
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        booking::{Booking, BookingStatus, CreateBooking, DoctorSummary},
        schedule::Owner,
    },
};

const BOOKING_COLUMNS: &str = r#"
    id, doctor_id, patient_id, date, time, status, created_at, updated_at,
    patient_second_name, patient_first_name, patient_surname,
    patient_birth_date, patient_gender, patient_phone
"#;

/// Map a write failure on the live-slot unique index to a conflict
fn slot_conflict(err: sqlx::Error, doctor_id: i32, date: NaiveDate, time: NaiveTime) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(format!(
            "Doctor {} already has an appointment on {} at {}",
            doctor_id,
            date,
            time.format("%H:%M")
        ))
    } else {
        AppError::Database(err)
    }
}

impl Repository {
    /// Get appointment by ID
    pub async fn bookings_get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {} FROM appointments WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))
    }

    /// Appointments of an owner between two dates (inclusive), all statuses
    pub async fn bookings_between(
        &self,
        owner: Owner,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        let query = format!(
            r#"
            SELECT {}
            FROM appointments
            WHERE date >= $1 AND date <= $2
              AND ($3::int IS NULL OR doctor_id = $3)
            ORDER BY date, time, id
            "#,
            BOOKING_COLUMNS
        );

        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(from)
            .bind(to)
            .bind(owner.doctor_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Appointments of a patient from a date on
    pub async fn bookings_for_patient(&self, patient_id: i32, from: NaiveDate) -> AppResult<Vec<Booking>> {
        let query = format!(
            r#"
            SELECT {}
            FROM appointments
            WHERE patient_id = $1 AND date >= $2
            ORDER BY date, time
            "#,
            BOOKING_COLUMNS
        );

        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(patient_id)
            .bind(from)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Appointments in one status, earliest slot first
    pub async fn bookings_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        let query = format!(
            "SELECT {} FROM appointments WHERE status = $1 ORDER BY date, time, id",
            BOOKING_COLUMNS
        );

        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Doctor summaries for a set of ids
    pub async fn bookings_doctors(&self, ids: &[i32]) -> AppResult<Vec<DoctorSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, DoctorSummary>(
            r#"
            SELECT id, second_name, first_name, surname, specialty
            FROM doctors
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create an unconfirmed appointment
    pub async fn bookings_create(&self, data: &CreateBooking) -> AppResult<Booking> {
        let query = format!(
            r#"
            INSERT INTO appointments (
                doctor_id, patient_id, date, time, status,
                patient_second_name, patient_first_name, patient_surname,
                patient_birth_date, patient_gender, patient_phone
            )
            VALUES ($1, $2, $3, $4, 'unconfirmed', $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&query)
            .bind(data.doctor_id)
            .bind(data.patient_id)
            .bind(data.date)
            .bind(data.time)
            .bind(&data.patient_second_name)
            .bind(&data.patient_first_name)
            .bind(&data.patient_surname)
            .bind(data.patient_birth_date)
            .bind(&data.patient_gender)
            .bind(&data.patient_phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| slot_conflict(e, data.doctor_id, data.date, data.time))
    }

    /// Set the status of an appointment
    pub async fn bookings_set_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let query = format!(
            "UPDATE appointments SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&query)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))
    }

    /// Move an appointment to another date and time of the same doctor
    pub async fn bookings_move(&self, id: i32, date: NaiveDate, time: NaiveTime) -> AppResult<Booking> {
        let query = format!(
            "UPDATE appointments SET date = $1, time = $2, updated_at = NOW() WHERE id = $3 RETURNING {}",
            BOOKING_COLUMNS
        );

        let moved = sqlx::query_as::<_, Booking>(&query)
            .bind(date)
            .bind(time)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;

        match moved {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(AppError::NotFound(format!("Appointment with id {} not found", id))),
            Err(e) if is_unique_violation(&e) => {
                let doctor_id = self.bookings_get_by_id(id).await?.doctor_id;
                Err(slot_conflict(e, doctor_id, date, time))
            }
            Err(e) => Err(e.into()),
        }
    }
}
