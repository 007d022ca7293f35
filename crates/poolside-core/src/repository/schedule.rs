//! Schedule repository trait definition.

use poolside_types::error::RepositoryError;
use poolside_types::schedule::{NewSchedule, Schedule, ScheduleChanges};

/// Repository trait for swimming schedule persistence.
pub trait ScheduleRepository: Send + Sync {
    fn create(
        &self,
        schedule: &NewSchedule,
    ) -> impl std::future::Future<Output = Result<Schedule, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Schedule>, RepositoryError>> + Send;

    /// Active schedules ordered by day of week, then start time.
    fn list_active(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Schedule>, RepositoryError>> + Send;

    /// Apply a partial update and return the updated row (`NotFound` if absent).
    fn update(
        &self,
        id: i64,
        changes: &ScheduleChanges,
    ) -> impl std::future::Future<Output = Result<Schedule, RepositoryError>> + Send;

    /// Permanently delete a schedule (`NotFound` if absent).
    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
