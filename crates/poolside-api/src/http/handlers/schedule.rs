//! Swimming schedule handlers.
//!
//! Reads are public; writes require an administrator.

use axum::extract::{Path, State};
use axum::response::Response;

use poolside_core::message::MessageCategory;
use poolside_types::schedule::{
    AvailabilityQuery, CreateScheduleRequest, ScheduleRemoval, UpdateScheduleRequest,
};

use crate::http::error::{AppError, ResultExt};
use crate::http::extractors::auth::{AdminOnly, Authorized};
use crate::http::extractors::json::ValidJson;
use crate::http::extractors::query::ValidQuery;
use crate::http::response::{message, with_data};
use crate::state::AppState;

/// GET /api/schedules - Active schedules, by weekday then start time.
pub async fn list_schedules(State(state): State<AppState>) -> Result<Response, AppError> {
    let schedules = state
        .schedule_service
        .list_active()
        .await
        .or_fail(MessageCategory::ScheduleFetchError)?;

    Ok(with_data(MessageCategory::ScheduleListRetrieved, &schedules))
}

/// GET /api/schedules/availability?scheduleId=&date= - Free spots on a date.
pub async fn availability(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<AvailabilityQuery>,
) -> Result<Response, AppError> {
    let availability = state
        .schedule_service
        .availability(query)
        .await
        .or_fail(MessageCategory::ScheduleAvailabilityError)?;

    Ok(with_data(
        MessageCategory::ScheduleAvailabilityRetrieved,
        &availability,
    ))
}

/// GET /api/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let schedule = state
        .schedule_service
        .get(&id)
        .await
        .or_fail(MessageCategory::ScheduleFetchError)?;

    Ok(with_data(MessageCategory::ScheduleRetrieved, &schedule))
}

/// POST /api/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    ValidJson(body): ValidJson<CreateScheduleRequest>,
) -> Result<Response, AppError> {
    let schedule = state
        .schedule_service
        .create(body)
        .await
        .or_fail(MessageCategory::ScheduleCreateError)?;

    Ok(with_data(MessageCategory::ScheduleCreated, &schedule))
}

/// PUT /api/schedules/{id}
pub async fn update_schedule(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateScheduleRequest>,
) -> Result<Response, AppError> {
    let schedule = state
        .schedule_service
        .update(&id, body)
        .await
        .or_fail(MessageCategory::ScheduleUpdateError)?;

    Ok(with_data(MessageCategory::ScheduleUpdated, &schedule))
}

/// DELETE /api/schedules/{id} - Delete, or deactivate when reservations exist.
pub async fn delete_schedule(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let removal = state
        .schedule_service
        .delete(&id)
        .await
        .or_fail(MessageCategory::ScheduleDeleteError)?;

    Ok(match removal {
        ScheduleRemoval::Deleted => message(MessageCategory::ScheduleDeleted),
        ScheduleRemoval::Deactivated => message(MessageCategory::ScheduleDeactivated),
    })
}
