//! Schedules service (weekly templates, daily overrides)

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use super::with_deadline;
use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        DailyOverride, Owner, ReplaceWeeklyTemplate, UpsertDailyOverride, WeeklyTemplateEntry,
    },
    repository::ScheduleStore,
};

#[derive(Clone)]
pub struct SchedulesService {
    store: Arc<dyn ScheduleStore>,
    timeout: Duration,
}

impl SchedulesService {
    pub fn new(store: Arc<dyn ScheduleStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    // ---- Weekly template ----
    pub async fn weekly_template(&self, owner: Owner) -> AppResult<Vec<WeeklyTemplateEntry>> {
        with_deadline(self.timeout, "weekly_template", self.store.weekly_template(owner)).await
    }

    /// Validate the whole week, then upsert every submitted weekday
    pub async fn replace_weekly_template(
        &self,
        owner: Owner,
        data: &ReplaceWeeklyTemplate,
    ) -> AppResult<Vec<WeeklyTemplateEntry>> {
        data.validate()?;

        let entries = with_deadline(
            self.timeout,
            "replace_weekly_template",
            self.store.replace_weekly_template(owner, &data.days),
        )
        .await?;

        info!(%owner, days = data.days.len(), "Weekly template replaced");
        Ok(entries)
    }

    // ---- Daily overrides ----
    pub async fn list_overrides(
        &self,
        owner: Owner,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyOverride>> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::Validation("start_date must not be after end_date".to_string()));
            }
        }
        with_deadline(
            self.timeout,
            "daily_overrides",
            self.store.daily_overrides(owner, start_date, end_date),
        )
        .await
    }

    /// Create or replace the override of one date
    pub async fn upsert_daily_override(
        &self,
        owner: Owner,
        data: &UpsertDailyOverride,
    ) -> AppResult<DailyOverride> {
        data.validate()?;

        let saved = with_deadline(
            self.timeout,
            "upsert_daily_override",
            self.store.upsert_daily_override(owner, data),
        )
        .await?;

        info!(%owner, date = %saved.date, is_day_off = saved.is_day_off, "Daily override saved");
        Ok(saved)
    }
}
