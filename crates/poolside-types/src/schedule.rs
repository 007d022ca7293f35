use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A recurring weekly swimming slot.
///
/// `day_of_week` follows the JavaScript convention the web client uses:
/// 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub day_of_week: i64,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub max_capacity: i64,
    pub lane_count: i64,
    /// Inactive schedules are hidden from listings and cannot be booked.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a new schedule row.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub day_of_week: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_capacity: i64,
    pub lane_count: i64,
}

/// Partial update of a schedule row. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ScheduleChanges {
    pub day_of_week: Option<i64>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub max_capacity: Option<i64>,
    pub lane_count: Option<i64>,
    pub is_active: Option<bool>,
}

/// Body of `POST /api/schedules`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_capacity: Option<i64>,
    pub lane_count: Option<i64>,
}

/// Body of `PUT /api/schedules/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_capacity: Option<i64>,
    pub lane_count: Option<i64>,
    pub is_active: Option<bool>,
}

/// Query string of `GET /api/schedules/availability`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub schedule_id: Option<String>,
    pub date: Option<String>,
}

/// Remaining capacity of a schedule on a given date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub schedule: Schedule,
    pub date: NaiveDate,
    pub total_capacity: i64,
    pub reserved_spots: i64,
    pub available_spots: i64,
    pub is_full: bool,
}

impl Availability {
    /// Compute availability from the schedule and its non-cancelled bookings.
    pub fn compute(schedule: Schedule, date: NaiveDate, reserved_spots: i64) -> Self {
        let total_capacity = schedule.max_capacity;
        let available_spots = (total_capacity - reserved_spots).max(0);
        Self {
            schedule,
            date,
            total_capacity,
            reserved_spots,
            available_spots,
            is_full: available_spots == 0,
        }
    }
}

/// What deleting a schedule actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleRemoval {
    /// No reservations referenced it; the row is gone.
    Deleted,
    /// Reservations reference it; it was only marked inactive.
    Deactivated,
}

/// Parse a wall-clock time as sent by clients.
///
/// Accepts `HH:MM`, `HH:MM:SS`, or a full RFC 3339 timestamp (only its time
/// of day is kept).
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.time()))
}

/// Parse a calendar date (`YYYY-MM-DD`, or the date part of an RFC 3339 timestamp).
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Serde adapter storing times as `HH:MM`.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time: '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_schedule(capacity: i64) -> Schedule {
        let now = Utc::now();
        Schedule {
            id: 1,
            day_of_week: 1,
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            max_capacity: capacity,
            lane_count: 4,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parse_clock_time_formats() {
        let expected = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(parse_clock_time("07:30"), Some(expected));
        assert_eq!(parse_clock_time("07:30:00"), Some(expected));
        assert_eq!(parse_clock_time("1970-01-01T07:30:00Z"), Some(expected));
        assert_eq!(parse_clock_time("7.30am"), None);
        assert_eq!(parse_clock_time("25:00"), None);
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_calendar_date("2025-03-14"), Some(expected));
        assert_eq!(parse_calendar_date("2025-03-14T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_calendar_date("14/03/2025"), None);
    }

    #[test]
    fn test_schedule_serializes_short_times() {
        let json = serde_json::to_value(make_schedule(10)).unwrap();
        assert_eq!(json["startTime"], "07:00");
        assert_eq!(json["endTime"], "08:30");
        assert_eq!(json["dayOfWeek"], 1);
        assert_eq!(json["maxCapacity"], 10);
    }

    #[test]
    fn test_availability_compute() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let open = Availability::compute(make_schedule(10), date, 3);
        assert_eq!(open.available_spots, 7);
        assert!(!open.is_full);

        let full = Availability::compute(make_schedule(2), date, 2);
        assert_eq!(full.available_spots, 0);
        assert!(full.is_full);
    }

    #[test]
    fn test_availability_never_negative() {
        // Capacity lowered after bookings were taken.
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let over = Availability::compute(make_schedule(2), date, 5);
        assert_eq!(over.available_spots, 0);
        assert!(over.is_full);
    }
}
