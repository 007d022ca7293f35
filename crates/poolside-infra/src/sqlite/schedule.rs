//! SQLite schedule repository implementation.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use poolside_core::repository::schedule::ScheduleRepository;
use poolside_types::error::RepositoryError;
use poolside_types::schedule::{NewSchedule, Schedule, ScheduleChanges};

use super::pool::DatabasePool;
use super::{format_datetime, format_time, parse_datetime, parse_time, query_error};

/// SQLite-backed implementation of `ScheduleRepository`.
pub struct SqliteScheduleRepository {
    pool: DatabasePool,
}

impl SqliteScheduleRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ScheduleRow {
    id: i64,
    day_of_week: i64,
    start_time: String,
    end_time: String,
    max_capacity: i64,
    lane_count: i64,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl ScheduleRow {
    /// Columns are read under `prefix`, so joined queries can alias them (`s_id`, ...).
    fn from_row(row: &SqliteRow, prefix: &str) -> Result<Self, sqlx::Error> {
        let col = |name: &str| format!("{prefix}{name}");
        Ok(Self {
            id: row.try_get(col("id").as_str())?,
            day_of_week: row.try_get(col("day_of_week").as_str())?,
            start_time: row.try_get(col("start_time").as_str())?,
            end_time: row.try_get(col("end_time").as_str())?,
            max_capacity: row.try_get(col("max_capacity").as_str())?,
            lane_count: row.try_get(col("lane_count").as_str())?,
            is_active: row.try_get(col("is_active").as_str())?,
            created_at: row.try_get(col("created_at").as_str())?,
            updated_at: row.try_get(col("updated_at").as_str())?,
        })
    }

    fn into_schedule(self) -> Result<Schedule, RepositoryError> {
        Ok(Schedule {
            id: self.id,
            day_of_week: self.day_of_week,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
            max_capacity: self.max_capacity,
            lane_count: self.lane_count,
            is_active: self.is_active,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Map a row whose schedule columns carry `prefix`.
pub(crate) fn map_schedule(row: &SqliteRow, prefix: &str) -> Result<Schedule, RepositoryError> {
    ScheduleRow::from_row(row, prefix)
        .map_err(query_error)?
        .into_schedule()
}

/// Column list aliasing every schedule column with the `s_` prefix.
pub(crate) const SCHEDULE_COLUMNS_AS_S: &str = "s.id AS s_id, s.day_of_week AS s_day_of_week, \
     s.start_time AS s_start_time, s.end_time AS s_end_time, s.max_capacity AS s_max_capacity, \
     s.lane_count AS s_lane_count, s.is_active AS s_is_active, s.created_at AS s_created_at, \
     s.updated_at AS s_updated_at";

async fn fetch_schedule(pool: &SqlitePool, id: i64) -> Result<Option<Schedule>, RepositoryError> {
    let row = sqlx::query("SELECT * FROM swimming_schedules WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(|r| map_schedule(r, "")).transpose()
}

impl ScheduleRepository for SqliteScheduleRepository {
    async fn create(&self, schedule: &NewSchedule) -> Result<Schedule, RepositoryError> {
        let now = format_datetime(&Utc::now());

        let id = sqlx::query(
            "INSERT INTO swimming_schedules (day_of_week, start_time, end_time, max_capacity, lane_count, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(schedule.day_of_week)
        .bind(format_time(schedule.start_time))
        .bind(format_time(schedule.end_time))
        .bind(schedule.max_capacity)
        .bind(schedule.lane_count)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?
        .last_insert_rowid();

        fetch_schedule(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Schedule>, RepositoryError> {
        fetch_schedule(&self.pool.reader, id).await
    }

    async fn list_active(&self) -> Result<Vec<Schedule>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM swimming_schedules WHERE is_active = 1 ORDER BY day_of_week, start_time",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter().map(|r| map_schedule(r, "")).collect()
    }

    async fn update(&self, id: i64, changes: &ScheduleChanges) -> Result<Schedule, RepositoryError> {
        let result = sqlx::query(
            "UPDATE swimming_schedules SET
                day_of_week = COALESCE(?, day_of_week),
                start_time = COALESCE(?, start_time),
                end_time = COALESCE(?, end_time),
                max_capacity = COALESCE(?, max_capacity),
                lane_count = COALESCE(?, lane_count),
                is_active = COALESCE(?, is_active),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(changes.day_of_week)
        .bind(changes.start_time.map(format_time))
        .bind(changes.end_time.map(format_time))
        .bind(changes.max_capacity)
        .bind(changes.lane_count)
        .bind(changes.is_active)
        .bind(format_datetime(&Utc::now()))
        .bind(id)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        fetch_schedule(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM swimming_schedules WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.message().contains("FOREIGN KEY") => {
                    RepositoryError::Conflict(format!("schedule {id} is still referenced"))
                }
                other => query_error(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
