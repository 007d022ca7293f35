//! Reservation repository trait definition.

use chrono::NaiveDate;

use poolside_types::error::RepositoryError;
use poolside_types::reservation::{
    BookingOutcome, NewPayment, NewReservation, Reservation, ReservationDetail, ReservationFilter,
    ReservationStatus,
};

/// Repository trait for reservations and their payment ledger.
pub trait ReservationRepository: Send + Sync {
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Reservation>, RepositoryError>> + Send;

    /// Reservation with its user summary, schedule and payment records.
    fn get_detail(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ReservationDetail>, RepositoryError>> + Send;

    /// Filtered listing with user summary and schedule, ordered by date then creation.
    fn list(
        &self,
        filter: &ReservationFilter,
    ) -> impl std::future::Future<Output = Result<Vec<ReservationDetail>, RepositoryError>> + Send;

    /// One user's reservations with their schedule, ordered by date.
    fn list_for_user(
        &self,
        user_id: i64,
        status: Option<ReservationStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<ReservationDetail>, RepositoryError>> + Send;

    /// Number of reservations of any status referencing the schedule.
    fn count_for_schedule(
        &self,
        schedule_id: i64,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Number of non-cancelled reservations for a schedule on a date.
    fn count_active(
        &self,
        schedule_id: i64,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Book a slot if capacity remains and the user has no live booking for it.
    ///
    /// The capacity count, duplicate check and insert run in one write
    /// transaction, so concurrent bookings cannot overfill a slot.
    fn book(
        &self,
        reservation: &NewReservation,
        capacity: i64,
    ) -> impl std::future::Future<Output = Result<BookingOutcome, RepositoryError>> + Send;

    /// Set the status and return the reservation with its schedule.
    fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> impl std::future::Future<Output = Result<ReservationDetail, RepositoryError>> + Send;

    /// Mark paid, move to `status` and append a payment record, atomically.
    fn confirm_payment(
        &self,
        id: i64,
        status: ReservationStatus,
        payment: &NewPayment,
    ) -> impl std::future::Future<Output = Result<Reservation, RepositoryError>> + Send;
}
