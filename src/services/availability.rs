//! Availability service: staff grids, slot picker and appointment lists

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use super::with_deadline;
use crate::{
    config::ScheduleConfig,
    error::AppResult,
    models::{
        availability::{
            AppointmentView, CellState, DoctorBrief, GridCellView, GridDayView, Occupant, PatientSummary,
            ScheduleGridView, SlotPicker, SlotPickerDay,
        },
        booking::{Booking, BookingStatus, DoctorSummary},
        schedule::Owner,
    },
    repository::ScheduleStore,
    scheduling::{
        free_slots, grid, weekday::date_label, GridCell, ScheduleGrid, ScheduleSnapshot, ScheduleWindow,
    },
};

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn ScheduleStore>,
    config: ScheduleConfig,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn ScheduleStore>, config: ScheduleConfig) -> Self {
        Self { store, config }
    }

    /// Fail unless the store answers within the deadline
    pub async fn check_store(&self) -> AppResult<()> {
        with_deadline(self.config.store_timeout(), "ping", self.store.ping()).await
    }

    /// Clinic wall-clock time of an instant
    pub fn local_now(&self, now: DateTime<Utc>) -> NaiveDateTime {
        match FixedOffset::east_opt(self.config.utc_offset_minutes * 60) {
            Some(offset) => now.with_timezone(&offset).naive_local(),
            None => now.naive_utc(),
        }
    }

    /// Window of the configured number of weeks around `now`
    pub fn window(&self, now: DateTime<Utc>) -> ScheduleWindow {
        ScheduleWindow::starting_week_of(self.local_now(now).date(), self.config.window_weeks)
    }

    /// Read template, overrides and bookings of an owner, in that order
    pub async fn snapshot(&self, owner: Owner, window: &ScheduleWindow) -> AppResult<ScheduleSnapshot> {
        let limit = self.config.store_timeout();
        let (first, last) = (window.first(), window.last());

        let template = with_deadline(limit, "weekly_template", self.store.weekly_template(owner)).await?;
        let overrides = with_deadline(
            limit,
            "daily_overrides",
            self.store.daily_overrides(owner, Some(first), Some(last)),
        )
        .await?;
        let bookings = with_deadline(limit, "bookings", self.store.bookings(owner, first, last)).await?;

        debug!(
            %owner,
            %first,
            %last,
            template = template.len(),
            overrides = overrides.len(),
            bookings = bookings.len(),
            "Loaded schedule snapshot"
        );

        Ok(ScheduleSnapshot::new(template, overrides, bookings))
    }

    /// Clinic-wide grid, every doctor's appointments on the clinic hours
    pub async fn clinic_grid(&self, now: DateTime<Utc>) -> AppResult<ScheduleGridView> {
        let window = self.window(now);
        let snapshot = self.snapshot(Owner::Clinic, &window).await?;
        let schedule = grid(&snapshot, &window);

        let doctor_ids: Vec<i32> = schedule
            .days
            .iter()
            .flat_map(|d| d.cells.values())
            .filter_map(|c| match c {
                GridCell::Occupied(bookings) => Some(bookings.iter().map(|b| b.doctor_id)),
                _ => None,
            })
            .flatten()
            .collect();
        let doctors = self.doctor_directory(doctor_ids.into_iter()).await?;

        Ok(self.grid_view(None, &window, schedule, Some(&doctors)))
    }

    /// Grid of one doctor
    pub async fn doctor_grid(&self, doctor_id: i32, now: DateTime<Utc>) -> AppResult<ScheduleGridView> {
        let window = self.window(now);
        let snapshot = self.snapshot(Owner::Doctor(doctor_id), &window).await?;
        let schedule = grid(&snapshot, &window);
        Ok(self.grid_view(Some(doctor_id), &window, schedule, None))
    }

    /// Free slots of a doctor from `now` on, grouped by date
    pub async fn slot_picker(&self, doctor_id: i32, now: DateTime<Utc>) -> AppResult<SlotPicker> {
        let window = self.window(now);
        let snapshot = self.snapshot(Owner::Doctor(doctor_id), &window).await?;
        let days = free_slots(&snapshot, &window, Some(self.local_now(now)))
            .into_iter()
            .map(|day| SlotPickerDay {
                label: date_label(day.date, self.config.label_locale),
                date: day.date,
                slots: day.slots,
            })
            .collect();

        Ok(SlotPicker { doctor_id, days })
    }

    /// Whether a doctor's slot is currently offered as free
    pub async fn is_slot_free(
        &self,
        doctor_id: i32,
        date: NaiveDate,
        time: NaiveTime,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let window = self.window(now);
        if !window.contains(date) {
            return Ok(false);
        }

        let snapshot = self.snapshot(Owner::Doctor(doctor_id), &window).await?;
        let free = free_slots(&snapshot, &window, Some(self.local_now(now)))
            .into_iter()
            .find(|d| d.date == date)
            .is_some_and(|d| d.slots.contains(&time));
        Ok(free)
    }

    /// Live appointments of a doctor for the current day, by time
    pub async fn doctor_today(&self, doctor_id: i32, now: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        let today = self.local_now(now).date();
        let mut bookings = with_deadline(
            self.config.store_timeout(),
            "bookings",
            self.store.bookings(Owner::Doctor(doctor_id), today, today),
        )
        .await?;

        bookings.retain(|b| b.status.holds_slot());
        bookings.sort_by_key(|b| (b.time, b.id));
        Ok(bookings)
    }

    /// Live appointments of a patient starting at or after `now`, with their doctor
    pub async fn patient_upcoming(&self, patient_id: i32, now: DateTime<Utc>) -> AppResult<Vec<AppointmentView>> {
        let local = self.local_now(now);
        let mut bookings = with_deadline(
            self.config.store_timeout(),
            "patient_bookings",
            self.store.patient_bookings(patient_id, local.date()),
        )
        .await?;

        bookings.retain(|b| b.status.holds_slot() && b.date.and_time(b.time) >= local);
        bookings.sort_by_key(|b| (b.date, b.time, b.id));
        self.appointment_views(&bookings).await
    }

    /// Unconfirmed appointments of every doctor, earliest slot first
    pub async fn pending_confirmation(&self) -> AppResult<Vec<AppointmentView>> {
        let mut bookings = with_deadline(
            self.config.store_timeout(),
            "bookings_with_status",
            self.store.bookings_with_status(BookingStatus::Unconfirmed),
        )
        .await?;

        bookings.retain(|b| b.status == BookingStatus::Unconfirmed);
        bookings.sort_by_key(|b| (b.date, b.time, b.id));
        debug!(pending = bookings.len(), "Loaded unconfirmed appointments");
        self.appointment_views(&bookings).await
    }

    /// Summaries of the given doctors by id, one store call at most
    async fn doctor_directory(
        &self,
        ids: impl Iterator<Item = i32>,
    ) -> AppResult<HashMap<i32, DoctorSummary>> {
        let mut ids: Vec<i32> = ids.collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let doctors = with_deadline(self.config.store_timeout(), "doctors", self.store.doctors(&ids)).await?;
        Ok(doctors.into_iter().map(|d| (d.id, d)).collect())
    }

    async fn appointment_views(&self, bookings: &[Booking]) -> AppResult<Vec<AppointmentView>> {
        let doctors = self.doctor_directory(bookings.iter().map(|b| b.doctor_id)).await?;
        Ok(bookings
            .iter()
            .map(|b| AppointmentView::new(b, doctors.get(&b.doctor_id).map(DoctorBrief::from)))
            .collect())
    }

    fn grid_view(
        &self,
        doctor_id: Option<i32>,
        window: &ScheduleWindow,
        schedule: ScheduleGrid,
        doctors: Option<&HashMap<i32, DoctorSummary>>,
    ) -> ScheduleGridView {
        let times = schedule.times;
        let days = schedule
            .days
            .iter()
            .map(|day| GridDayView {
                date: day.date,
                label: date_label(day.date, self.config.label_locale),
                is_day_off: day.effective.as_ref().map_or(true, |e| e.is_day_off),
                source: day.effective.as_ref().map(|e| e.source),
                cells: times
                    .iter()
                    .map(|&time| match day.cell(time) {
                        GridCell::Closed => GridCellView { time, state: CellState::Closed, occupants: Vec::new() },
                        GridCell::Free => GridCellView { time, state: CellState::Free, occupants: Vec::new() },
                        GridCell::Occupied(bookings) => GridCellView {
                            time,
                            state: CellState::Occupied,
                            occupants: bookings
                                .iter()
                                .map(|b| Occupant {
                                    booking_id: b.id,
                                    status: b.status,
                                    patient: PatientSummary::from(b),
                                    doctor: doctors
                                        .and_then(|m| m.get(&b.doctor_id))
                                        .map(DoctorBrief::from),
                                })
                                .collect(),
                        },
                    })
                    .collect(),
            })
            .collect();

        ScheduleGridView {
            doctor_id,
            first_date: window.first(),
            last_date: window.last(),
            times,
            days,
        }
    }
}
