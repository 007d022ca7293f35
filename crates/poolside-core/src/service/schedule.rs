//! Schedule management and per-date availability.

use chrono::NaiveTime;

use poolside_types::error::{RepositoryError, ScheduleError};
use poolside_types::schedule::{
    Availability, AvailabilityQuery, CreateScheduleRequest, NewSchedule, Schedule,
    ScheduleChanges, ScheduleRemoval, UpdateScheduleRequest, parse_calendar_date,
    parse_clock_time,
};

use crate::repository::reservation::ReservationRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::service::parse_id;

pub struct ScheduleService<S: ScheduleRepository, R: ReservationRepository> {
    schedules: S,
    reservations: R,
}

impl<S, R> ScheduleService<S, R>
where
    S: ScheduleRepository,
    R: ReservationRepository,
{
    pub fn new(schedules: S, reservations: R) -> Self {
        Self {
            schedules,
            reservations,
        }
    }

    /// Active schedules ordered by weekday, then start time.
    pub async fn list_active(&self) -> Result<Vec<Schedule>, ScheduleError> {
        self.schedules.list_active().await.map_err(storage)
    }

    /// Fetch one schedule, active or not.
    pub async fn get(&self, raw_id: &str) -> Result<Schedule, ScheduleError> {
        let id = parse_schedule_id(raw_id)?;
        self.find(id).await
    }

    pub async fn create(&self, request: CreateScheduleRequest) -> Result<Schedule, ScheduleError> {
        let new_schedule = validate_new(&request)?;
        let schedule = self.schedules.create(&new_schedule).await.map_err(storage)?;
        tracing::info!(
            schedule_id = schedule.id,
            day_of_week = schedule.day_of_week,
            "schedule created"
        );
        Ok(schedule)
    }

    /// Apply a partial update. The resulting slot must still end after it starts.
    pub async fn update(
        &self,
        raw_id: &str,
        request: UpdateScheduleRequest,
    ) -> Result<Schedule, ScheduleError> {
        let id = parse_schedule_id(raw_id)?;
        let changes = validate_changes(&request)?;
        let current = self.find(id).await?;

        let start = changes.start_time.unwrap_or(current.start_time);
        let end = changes.end_time.unwrap_or(current.end_time);
        check_time_order(start, end)?;

        self.schedules
            .update(id, &changes)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ScheduleError::NotFound,
                other => storage(other),
            })
    }

    /// Delete a schedule, or only deactivate it when reservations reference it.
    pub async fn delete(&self, raw_id: &str) -> Result<ScheduleRemoval, ScheduleError> {
        let id = parse_schedule_id(raw_id)?;
        self.find(id).await?;

        let referencing = self
            .reservations
            .count_for_schedule(id)
            .await
            .map_err(storage)?;

        if referencing > 0 {
            let changes = ScheduleChanges {
                is_active: Some(false),
                ..Default::default()
            };
            self.schedules.update(id, &changes).await.map_err(storage)?;
            tracing::info!(schedule_id = id, referencing, "schedule deactivated");
            return Ok(ScheduleRemoval::Deactivated);
        }

        self.schedules.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ScheduleError::NotFound,
            other => storage(other),
        })?;
        tracing::info!(schedule_id = id, "schedule deleted");
        Ok(ScheduleRemoval::Deleted)
    }

    /// Remaining spots of a schedule on one date.
    pub async fn availability(&self, query: AvailabilityQuery) -> Result<Availability, ScheduleError> {
        let (Some(raw_id), Some(raw_date)) = (
            query.schedule_id.as_deref().filter(|v| !v.trim().is_empty()),
            query.date.as_deref().filter(|v| !v.trim().is_empty()),
        ) else {
            return Err(ScheduleError::MissingAvailabilityParams);
        };

        let id = parse_schedule_id(raw_id)?;
        let date = parse_calendar_date(raw_date)
            .ok_or_else(|| ScheduleError::InvalidData(format!("invalid date '{raw_date}'")))?;

        let schedule = self.find(id).await?;
        let reserved = self
            .reservations
            .count_active(id, date)
            .await
            .map_err(storage)?;

        Ok(Availability::compute(schedule, date, reserved))
    }

    async fn find(&self, id: i64) -> Result<Schedule, ScheduleError> {
        self.schedules
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(ScheduleError::NotFound)
    }
}

fn parse_schedule_id(raw: &str) -> Result<i64, ScheduleError> {
    parse_id(raw).ok_or_else(|| ScheduleError::InvalidId(raw.to_string()))
}

fn storage(e: RepositoryError) -> ScheduleError {
    ScheduleError::StorageError(e.to_string())
}

fn validate_new(request: &CreateScheduleRequest) -> Result<NewSchedule, ScheduleError> {
    let (Some(day_of_week), Some(start), Some(end), Some(max_capacity), Some(lane_count)) = (
        request.day_of_week,
        request.start_time.as_deref(),
        request.end_time.as_deref(),
        request.max_capacity,
        request.lane_count,
    ) else {
        return Err(ScheduleError::MissingRequiredFields);
    };

    let start_time = clock(start)?;
    let end_time = clock(end)?;
    check_day(day_of_week)?;
    check_time_order(start_time, end_time)?;
    check_positive("maxCapacity", max_capacity)?;
    check_positive("laneCount", lane_count)?;

    Ok(NewSchedule {
        day_of_week,
        start_time,
        end_time,
        max_capacity,
        lane_count,
    })
}

fn validate_changes(request: &UpdateScheduleRequest) -> Result<ScheduleChanges, ScheduleError> {
    if let Some(day) = request.day_of_week {
        check_day(day)?;
    }
    if let Some(capacity) = request.max_capacity {
        check_positive("maxCapacity", capacity)?;
    }
    if let Some(lanes) = request.lane_count {
        check_positive("laneCount", lanes)?;
    }

    Ok(ScheduleChanges {
        day_of_week: request.day_of_week,
        start_time: request.start_time.as_deref().map(clock).transpose()?,
        end_time: request.end_time.as_deref().map(clock).transpose()?,
        max_capacity: request.max_capacity,
        lane_count: request.lane_count,
        is_active: request.is_active,
    })
}

fn clock(raw: &str) -> Result<NaiveTime, ScheduleError> {
    parse_clock_time(raw)
        .ok_or_else(|| ScheduleError::InvalidData(format!("invalid time '{raw}', expected HH:MM")))
}

fn check_day(day: i64) -> Result<(), ScheduleError> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidData(format!(
            "dayOfWeek must be between 0 and 6, got {day}"
        )))
    }
}

fn check_time_order(start: NaiveTime, end: NaiveTime) -> Result<(), ScheduleError> {
    if end > start {
        Ok(())
    } else {
        Err(ScheduleError::InvalidData(
            "endTime must be later than startTime".to_string(),
        ))
    }
}

fn check_positive(field: &str, value: i64) -> Result<(), ScheduleError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidData(format!(
            "{field} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateScheduleRequest {
        CreateScheduleRequest {
            day_of_week: Some(1),
            start_time: Some("07:00".to_string()),
            end_time: Some("08:00".to_string()),
            max_capacity: Some(12),
            lane_count: Some(4),
        }
    }

    #[test]
    fn test_validate_new_accepts_sunday() {
        let mut req = request();
        req.day_of_week = Some(0);
        let schedule = validate_new(&req).unwrap();
        assert_eq!(schedule.day_of_week, 0);
        assert_eq!(schedule.start_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn test_validate_new_missing_field() {
        let mut req = request();
        req.lane_count = None;
        assert!(matches!(
            validate_new(&req),
            Err(ScheduleError::MissingRequiredFields)
        ));
    }

    #[test]
    fn test_validate_new_rejects_bad_values() {
        let mut req = request();
        req.day_of_week = Some(7);
        assert!(matches!(validate_new(&req), Err(ScheduleError::InvalidData(_))));

        let mut req = request();
        req.end_time = Some("06:30".to_string());
        assert!(matches!(validate_new(&req), Err(ScheduleError::InvalidData(_))));

        let mut req = request();
        req.end_time = Some("07:00".to_string());
        assert!(matches!(validate_new(&req), Err(ScheduleError::InvalidData(_))));

        let mut req = request();
        req.max_capacity = Some(0);
        assert!(matches!(validate_new(&req), Err(ScheduleError::InvalidData(_))));

        let mut req = request();
        req.start_time = Some("seven".to_string());
        assert!(matches!(validate_new(&req), Err(ScheduleError::InvalidData(_))));
    }

    #[test]
    fn test_validate_changes_partial() {
        let changes = validate_changes(&UpdateScheduleRequest {
            max_capacity: Some(20),
            is_active: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.max_capacity, Some(20));
        assert_eq!(changes.is_active, Some(false));
        assert!(changes.start_time.is_none());

        let bad = validate_changes(&UpdateScheduleRequest {
            lane_count: Some(-1),
            ..Default::default()
        });
        assert!(matches!(bad, Err(ScheduleError::InvalidData(_))));
    }
}
