//! In-memory schedule store shared by the integration tests

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};

use clinic_scheduler::{
    config::ScheduleConfig,
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingStatus, CreateBooking, DoctorSummary},
        schedule::{DailyOverride, Owner, UpsertDailyOverride, WeeklyTemplateDay, WeeklyTemplateEntry},
    },
    repository::ScheduleStore,
    services::Services,
};

#[derive(Default)]
struct Tables {
    template: Vec<WeeklyTemplateEntry>,
    overrides: Vec<DailyOverride>,
    bookings: Vec<Booking>,
    doctors: Vec<DoctorSummary>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Live booking of the doctor at (date, time), other than `except`
    fn slot_taken(&self, doctor_id: i32, date: NaiveDate, time: NaiveTime, except: Option<i32>) -> bool {
        self.bookings.iter().any(|b| {
            b.doctor_id == doctor_id
                && b.date == date
                && b.time == time
                && b.status.holds_slot()
                && Some(b.id) != except
        })
    }
}

/// Store keeping everything in memory; uniqueness of live slots is checked
/// under the same lock as the write
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps `delay` before touching the data
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub fn add_doctor(&self, id: i32, second_name: &str, first_name: &str, specialty: &str) {
        let mut tables = self.tables.lock().unwrap();
        tables.doctors.push(DoctorSummary {
            id,
            second_name: second_name.to_string(),
            first_name: first_name.to_string(),
            surname: None,
            specialty: Some(specialty.to_string()),
        });
    }

    pub fn booking_count(&self) -> usize {
        self.tables.lock().unwrap().bookings.len()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.pause().await;
        Ok(())
    }

    async fn weekly_template(&self, owner: Owner) -> AppResult<Vec<WeeklyTemplateEntry>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<_> = tables
            .template
            .iter()
            .filter(|e| e.doctor_id == owner.doctor_id())
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.weekday);
        Ok(rows)
    }

    async fn daily_overrides(
        &self,
        owner: Owner,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyOverride>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .overrides
            .iter()
            .filter(|o| o.doctor_id == owner.doctor_id())
            .filter(|o| from.map_or(true, |f| o.date >= f) && to.map_or(true, |t| o.date <= t))
            .cloned()
            .collect())
    }

    async fn bookings(&self, owner: Owner, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Booking>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookings
            .iter()
            .filter(|b| owner.doctor_id().map_or(true, |id| b.doctor_id == id))
            .filter(|b| b.date >= from && b.date <= to)
            .cloned()
            .collect())
    }

    async fn patient_bookings(&self, patient_id: i32, from: NaiveDate) -> AppResult<Vec<Booking>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.patient_id == Some(patient_id) && b.date >= from)
            .cloned()
            .collect())
    }

    async fn bookings_with_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<_> = tables.bookings.iter().filter(|b| b.status == status).cloned().collect();
        rows.sort_by_key(|b| (b.date, b.time, b.id));
        Ok(rows)
    }

    async fn booking(&self, id: i32) -> AppResult<Booking> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        tables
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))
    }

    async fn doctors(&self, ids: &[i32]) -> AppResult<Vec<DoctorSummary>> {
        self.pause().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables.doctors.iter().filter(|d| ids.contains(&d.id)).cloned().collect())
    }

    async fn replace_weekly_template(
        &self,
        owner: Owner,
        days: &[WeeklyTemplateDay],
    ) -> AppResult<Vec<WeeklyTemplateEntry>> {
        self.pause().await;
        let mut tables = self.tables.lock().unwrap();
        for day in days {
            tables
                .template
                .retain(|e| !(e.doctor_id == owner.doctor_id() && e.weekday == day.weekday));
            let id = tables.next_id();
            tables.template.push(WeeklyTemplateEntry {
                id,
                doctor_id: owner.doctor_id(),
                weekday: day.weekday,
                start_time: day.start_time,
                end_time: day.end_time,
                slot_duration_minutes: day.slot_duration_minutes,
                is_day_off: day.is_day_off,
            });
        }
        let mut rows: Vec<_> = tables
            .template
            .iter()
            .filter(|e| e.doctor_id == owner.doctor_id())
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.weekday);
        Ok(rows)
    }

    async fn upsert_daily_override(&self, owner: Owner, data: &UpsertDailyOverride) -> AppResult<DailyOverride> {
        self.pause().await;
        let mut tables = self.tables.lock().unwrap();
        tables
            .overrides
            .retain(|o| !(o.doctor_id == owner.doctor_id() && o.date == data.date));
        let saved = DailyOverride {
            id: tables.next_id(),
            doctor_id: owner.doctor_id(),
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            slot_duration_minutes: data.slot_duration_minutes,
            is_day_off: data.is_day_off,
        };
        tables.overrides.push(saved.clone());
        Ok(saved)
    }

    async fn insert_booking(&self, data: &CreateBooking) -> AppResult<Booking> {
        self.pause().await;
        let mut tables = self.tables.lock().unwrap();
        if tables.slot_taken(data.doctor_id, data.date, data.time, None) {
            return Err(AppError::Conflict(format!(
                "Doctor {} already has an appointment on {} at {}",
                data.doctor_id, data.date, data.time
            )));
        }
        let now = Utc::now();
        let booking = Booking {
            id: tables.next_id(),
            doctor_id: data.doctor_id,
            patient_id: data.patient_id,
            date: data.date,
            time: data.time,
            status: BookingStatus::Unconfirmed,
            created_at: now,
            updated_at: now,
            patient_second_name: data.patient_second_name.clone(),
            patient_first_name: data.patient_first_name.clone(),
            patient_surname: data.patient_surname.clone(),
            patient_birth_date: data.patient_birth_date,
            patient_gender: data.patient_gender.clone(),
            patient_phone: data.patient_phone.clone(),
        };
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        self.pause().await;
        let mut tables = self.tables.lock().unwrap();
        let booking = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn reschedule_booking(&self, id: i32, date: NaiveDate, time: NaiveTime) -> AppResult<Booking> {
        self.pause().await;
        let mut tables = self.tables.lock().unwrap();
        let doctor_id = tables
            .bookings
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.doctor_id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))?;
        if tables.slot_taken(doctor_id, date, time, Some(id)) {
            return Err(AppError::Conflict(format!(
                "Doctor {} already has an appointment on {} at {}",
                doctor_id, date, time
            )));
        }
        let booking = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment with id {} not found", id)))?;
        booking.date = date;
        booking.time = time;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Services over a store with a one-week window, UTC clock and Russian labels
pub fn services(store: Arc<MemoryStore>, store_timeout_ms: u64) -> Services {
    let config = ScheduleConfig {
        window_weeks: 1,
        store_timeout_ms,
        ..ScheduleConfig::default()
    };
    Services::new(store, config)
}

pub fn working_day(weekday: i16, start: NaiveTime, end: NaiveTime, slot: i32) -> WeeklyTemplateDay {
    WeeklyTemplateDay {
        weekday,
        start_time: start,
        end_time: end,
        slot_duration_minutes: slot,
        is_day_off: false,
    }
}

pub fn booking_request(doctor_id: i32, patient_id: i32, date: NaiveDate, time: NaiveTime) -> CreateBooking {
    CreateBooking {
        doctor_id,
        patient_id: Some(patient_id),
        date,
        time,
        patient_second_name: "Smirnova".to_string(),
        patient_first_name: "Elena".to_string(),
        patient_surname: Some("Viktorovna".to_string()),
        patient_birth_date: NaiveDate::from_ymd_opt(1985, 4, 12),
        patient_gender: Some("F".to_string()),
        patient_phone: Some("+7 900 000 00 00".to_string()),
    }
}
