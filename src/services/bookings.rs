//! Appointments service (booking, status changes, rescheduling)

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

use super::{availability::AvailabilityService, with_deadline};
use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingStatus, CreateBooking, RescheduleBooking},
    repository::ScheduleStore,
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<dyn ScheduleStore>,
    availability: AvailabilityService,
    timeout: Duration,
}

impl BookingsService {
    pub fn new(store: Arc<dyn ScheduleStore>, availability: AvailabilityService, timeout: Duration) -> Self {
        Self { store, availability, timeout }
    }

    pub async fn get_booking(&self, id: i32) -> AppResult<Booking> {
        with_deadline(self.timeout, "booking", self.store.booking(id)).await
    }

    /// Book a slot currently offered as free.
    ///
    /// The free check is advisory: two concurrent requests may both pass it,
    /// the store then accepts exactly one of them.
    pub async fn create_booking(&self, data: &CreateBooking, now: DateTime<Utc>) -> AppResult<Booking> {
        data.validate()?;

        if !self
            .availability
            .is_slot_free(data.doctor_id, data.date, data.time, now)
            .await?
        {
            return Err(AppError::BusinessRule(format!(
                "{} {} is not a free slot of doctor {}",
                data.date,
                data.time.format("%H:%M"),
                data.doctor_id
            )));
        }

        let booking = with_deadline(self.timeout, "insert_booking", self.store.insert_booking(data)).await?;

        info!(
            booking_id = booking.id,
            doctor_id = booking.doctor_id,
            date = %booking.date,
            time = %booking.time,
            "Appointment booked"
        );
        Ok(booking)
    }

    /// Apply a status transition
    pub async fn update_booking_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let current = self.get_booking(id).await?;
        let next = current.status.transition_to(status)?;

        let booking = with_deadline(
            self.timeout,
            "update_booking_status",
            self.store.update_booking_status(id, next),
        )
        .await?;

        info!(booking_id = id, from = %current.status, to = %next, "Appointment status changed");
        Ok(booking)
    }

    pub async fn cancel_booking(&self, id: i32) -> AppResult<Booking> {
        self.update_booking_status(id, BookingStatus::Cancelled).await
    }

    /// Move a live appointment to another free slot of the same doctor
    pub async fn reschedule_booking(
        &self,
        id: i32,
        data: &RescheduleBooking,
        now: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let current = self.get_booking(id).await?;
        if current.status.is_terminal() {
            return Err(AppError::BusinessRule(format!(
                "A {} appointment cannot be rescheduled",
                current.status
            )));
        }
        if current.date == data.date && current.time == data.time {
            return Ok(current);
        }

        if !self
            .availability
            .is_slot_free(current.doctor_id, data.date, data.time, now)
            .await?
        {
            return Err(AppError::BusinessRule(format!(
                "{} {} is not a free slot of doctor {}",
                data.date,
                data.time.format("%H:%M"),
                current.doctor_id
            )));
        }

        let booking = with_deadline(
            self.timeout,
            "reschedule_booking",
            self.store.reschedule_booking(id, data.date, data.time),
        )
        .await?;

        info!(
            booking_id = id,
            from = %current.date.and_time(current.time),
            to = %booking.date.and_time(booking.time),
            "Appointment rescheduled"
        );
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ScheduleConfig,
        models::schedule::{Owner, WeeklyTemplateEntry},
        repository::MockScheduleStore,
    };
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use mockall::predicate::eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 7, 0, 0).unwrap()
    }

    fn booking(id: i32, time: NaiveTime, status: BookingStatus) -> Booking {
        Booking {
            id,
            doctor_id: 3,
            patient_id: Some(8),
            date: monday(),
            time,
            status,
            created_at: now(),
            updated_at: now(),
            patient_second_name: "Volkov".to_string(),
            patient_first_name: "Denis".to_string(),
            patient_surname: None,
            patient_birth_date: None,
            patient_gender: None,
            patient_phone: None,
        }
    }

    fn request(time: NaiveTime) -> CreateBooking {
        CreateBooking {
            doctor_id: 3,
            patient_id: Some(8),
            date: monday(),
            time,
            patient_second_name: "Volkov".to_string(),
            patient_first_name: "Denis".to_string(),
            patient_surname: None,
            patient_birth_date: None,
            patient_gender: None,
            patient_phone: None,
        }
    }

    /// Doctor 3 works Mondays 08:00-10:00 in 30 minute slots
    fn with_schedule(store: &mut MockScheduleStore, existing: Vec<Booking>) {
        store.expect_weekly_template().with(eq(Owner::Doctor(3))).returning(|_| {
            Ok(vec![WeeklyTemplateEntry {
                id: 1,
                doctor_id: Some(3),
                weekday: 1,
                start_time: t(8, 0),
                end_time: t(10, 0),
                slot_duration_minutes: 30,
                is_day_off: false,
            }])
        });
        store.expect_daily_overrides().returning(|_, _, _| Ok(vec![]));
        store.expect_bookings().returning(move |_, _, _| Ok(existing.clone()));
    }

    fn service(store: MockScheduleStore) -> BookingsService {
        let store: Arc<dyn ScheduleStore> = Arc::new(store);
        let config = ScheduleConfig { window_weeks: 1, ..ScheduleConfig::default() };
        let availability = AvailabilityService::new(store.clone(), config.clone());
        BookingsService::new(store, availability, config.store_timeout())
    }

    #[tokio::test]
    async fn test_create_booking_on_free_slot() {
        let mut store = MockScheduleStore::new();
        with_schedule(&mut store, vec![]);
        store
            .expect_insert_booking()
            .times(1)
            .returning(|data| Ok(booking(10, data.time, BookingStatus::Unconfirmed)));

        let created = service(store).create_booking(&request(t(8, 30)), now()).await.unwrap();
        assert_eq!(created.status, BookingStatus::Unconfirmed);
        assert_eq!(created.time, t(8, 30));
    }

    #[tokio::test]
    async fn test_create_booking_on_taken_slot_is_rule_violation() {
        let mut store = MockScheduleStore::new();
        with_schedule(&mut store, vec![booking(1, t(8, 30), BookingStatus::Confirmed)]);
        store.expect_insert_booking().never();

        let err = service(store).create_booking(&request(t(8, 30)), now()).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_create_booking_off_grid_or_past() {
        let mut store = MockScheduleStore::new();
        with_schedule(&mut store, vec![]);
        store.expect_insert_booking().never();
        let service = service(store);

        // not a grid time
        let err = service.create_booking(&request(t(8, 15)), now()).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        // already started
        let late = Utc.with_ymd_and_hms(2024, 6, 3, 9, 10, 0).unwrap();
        let err = service.create_booking(&request(t(9, 0)), late).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_store_conflict_is_surfaced() {
        let mut store = MockScheduleStore::new();
        with_schedule(&mut store, vec![]);
        store
            .expect_insert_booking()
            .returning(|_| Err(AppError::Conflict("taken".to_string())));

        let err = service(store).create_booking(&request(t(9, 0)), now()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_store() {
        let mut request = request(t(8, 0));
        request.patient_second_name.clear();
        let err = service(MockScheduleStore::new())
            .create_booking(&request, now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let mut store = MockScheduleStore::new();
        store
            .expect_booking()
            .with(eq(1))
            .returning(|id| Ok(booking(id, t(8, 0), BookingStatus::Unconfirmed)));
        store
            .expect_update_booking_status()
            .with(eq(1), eq(BookingStatus::Confirmed))
            .times(1)
            .returning(|id, status| Ok(booking(id, t(8, 0), status)));
        let service = service(store);

        let confirmed = service.update_booking_status(1, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let err = service.update_booking_status(1, BookingStatus::Completed).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_cancelled_booking_cannot_be_cancelled_again() {
        let mut store = MockScheduleStore::new();
        store
            .expect_booking()
            .returning(|id| Ok(booking(id, t(8, 0), BookingStatus::Cancelled)));
        store.expect_update_booking_status().never();

        let err = service(store).cancel_booking(4).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_unknown_booking() {
        let mut store = MockScheduleStore::new();
        store
            .expect_booking()
            .returning(|id| Err(AppError::NotFound(format!("Appointment with id {} not found", id))));

        let err = service(store).cancel_booking(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reschedule_to_free_slot() {
        let mut store = MockScheduleStore::new();
        let current = booking(5, t(8, 0), BookingStatus::Confirmed);
        with_schedule(&mut store, vec![current.clone()]);
        store.expect_booking().returning(move |_| Ok(current.clone()));
        store
            .expect_reschedule_booking()
            .with(eq(5), eq(monday()), eq(t(9, 30)))
            .times(1)
            .returning(|id, _, time| Ok(booking(id, time, BookingStatus::Confirmed)));

        let moved = service(store)
            .reschedule_booking(5, &RescheduleBooking { date: monday(), time: t(9, 30) }, now())
            .await
            .unwrap();
        assert_eq!(moved.time, t(9, 30));
    }

    #[tokio::test]
    async fn test_completed_booking_cannot_be_rescheduled() {
        let mut store = MockScheduleStore::new();
        store
            .expect_booking()
            .returning(|id| Ok(booking(id, t(8, 0), BookingStatus::Completed)));
        store.expect_reschedule_booking().never();

        let err = service(store)
            .reschedule_booking(5, &RescheduleBooking { date: monday(), time: t(9, 30) }, now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }
}
