//! Schedules domain methods on Repository (weekly templates, daily overrides)

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::AppResult,
    models::schedule::{DailyOverride, Owner, UpsertDailyOverride, WeeklyTemplateDay, WeeklyTemplateEntry},
};

impl Repository {
    // ---- Weekly template ----

    /// Weekly template of an owner, ordered by weekday
    pub async fn schedules_weekly_template(&self, owner: Owner) -> AppResult<Vec<WeeklyTemplateEntry>> {
        let rows = sqlx::query_as::<_, WeeklyTemplateEntry>(
            r#"
            SELECT id, doctor_id, weekday, start_time, end_time, slot_duration_minutes, is_day_off
            FROM weekly_schedules
            WHERE doctor_id IS NOT DISTINCT FROM $1
            ORDER BY weekday
            "#,
        )
        .bind(owner.doctor_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Upsert the submitted weekdays in one transaction and return the whole week
    pub async fn schedules_replace_week(
        &self,
        owner: Owner,
        days: &[WeeklyTemplateDay],
    ) -> AppResult<Vec<WeeklyTemplateEntry>> {
        let mut tx = self.pool.begin().await?;

        for day in days {
            sqlx::query(
                r#"
                INSERT INTO weekly_schedules
                    (doctor_id, weekday, start_time, end_time, slot_duration_minutes, is_day_off)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (COALESCE(doctor_id, 0), weekday) DO UPDATE SET
                    start_time = EXCLUDED.start_time,
                    end_time = EXCLUDED.end_time,
                    slot_duration_minutes = EXCLUDED.slot_duration_minutes,
                    is_day_off = EXCLUDED.is_day_off,
                    updated_at = NOW()
                "#,
            )
            .bind(owner.doctor_id())
            .bind(day.weekday)
            .bind(day.start_time)
            .bind(day.end_time)
            .bind(day.slot_duration_minutes)
            .bind(day.is_day_off)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.schedules_weekly_template(owner).await
    }

    // ---- Daily overrides ----

    /// List overrides of an owner, optionally filtered by date range
    pub async fn schedules_list_overrides(
        &self,
        owner: Owner,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyOverride>> {
        let mut conditions = vec!["doctor_id IS NOT DISTINCT FROM $1".to_string()];
        let mut idx = 2;

        if start_date.is_some() {
            conditions.push(format!("date >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("date <= ${}", idx));
        }

        let query = format!(
            r#"
            SELECT id, doctor_id, date, start_time, end_time, slot_duration_minutes, is_day_off
            FROM daily_overrides
            WHERE {}
            ORDER BY date
            "#,
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, DailyOverride>(&query).bind(owner.doctor_id());
        if let Some(sd) = start_date { builder = builder.bind(sd); }
        if let Some(ed) = end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Create or replace the override of one date
    pub async fn schedules_upsert_override(
        &self,
        owner: Owner,
        data: &UpsertDailyOverride,
    ) -> AppResult<DailyOverride> {
        let row = sqlx::query_as::<_, DailyOverride>(
            r#"
            INSERT INTO daily_overrides
                (doctor_id, date, start_time, end_time, slot_duration_minutes, is_day_off)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (COALESCE(doctor_id, 0), date) DO UPDATE SET
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                slot_duration_minutes = EXCLUDED.slot_duration_minutes,
                is_day_off = EXCLUDED.is_day_off,
                updated_at = NOW()
            RETURNING id, doctor_id, date, start_time, end_time, slot_duration_minutes, is_day_off
            "#,
        )
        .bind(owner.doctor_id())
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.slot_duration_minutes)
        .bind(data.is_day_off)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
