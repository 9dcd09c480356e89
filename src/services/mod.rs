//! Business logic services

pub mod availability;
pub mod bookings;
pub mod schedules;

use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    config::ScheduleConfig,
    error::{AppError, AppResult},
    repository::ScheduleStore,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub schedules: schedules::SchedulesService,
    pub bookings: bookings::BookingsService,
}

impl Services {
    /// Create all services on top of one schedule store
    pub fn new(store: Arc<dyn ScheduleStore>, config: ScheduleConfig) -> Self {
        let availability = availability::AvailabilityService::new(store.clone(), config.clone());
        Self {
            schedules: schedules::SchedulesService::new(store.clone(), config.store_timeout()),
            bookings: bookings::BookingsService::new(store, availability.clone(), config.store_timeout()),
            availability,
        }
    }
}

/// Run one store call under a deadline.
///
/// An elapsed deadline fails the call with `AppError::StoreTimeout`; the
/// pending future is dropped.
pub(crate) async fn with_deadline<T>(
    limit: Duration,
    call: &'static str,
    fut: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(call, timeout_ms = limit.as_millis() as u64, "Schedule store call timed out");
            Err(AppError::StoreTimeout(limit.as_millis() as u64))
        }
    }
}
