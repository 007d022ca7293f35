//! SQLite reservation repository implementation.
//!
//! Listing queries join `users` and `swimming_schedules` and alias their
//! columns (`u_*`, `s_*`) so one row maps to a full `ReservationDetail`.

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{Sqlite, SqlitePool, SqliteRow};
use sqlx::{QueryBuilder, Row};

use poolside_core::repository::reservation::ReservationRepository;
use poolside_types::error::RepositoryError;
use poolside_types::reservation::{
    BookingOutcome, NewPayment, NewReservation, PaymentRecord, Reservation, ReservationDetail,
    ReservationFilter, ReservationStatus,
};
use poolside_types::user::UserSummary;

use super::pool::DatabasePool;
use super::schedule::{SCHEDULE_COLUMNS_AS_S, map_schedule};
use super::{format_date, format_datetime, parse_date, parse_datetime, query_error};

/// SQLite-backed implementation of `ReservationRepository`.
pub struct SqliteReservationRepository {
    pool: DatabasePool,
}

impl SqliteReservationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ReservationRow {
    id: i64,
    user_id: i64,
    schedule_id: i64,
    date: String,
    status: String,
    is_paid: bool,
    payment_date: Option<String>,
    payment_confirmed_by: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl ReservationRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            schedule_id: row.try_get("schedule_id")?,
            date: row.try_get("date")?,
            status: row.try_get("status")?,
            is_paid: row.try_get("is_paid")?,
            payment_date: row.try_get("payment_date")?,
            payment_confirmed_by: row.try_get("payment_confirmed_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_reservation(self) -> Result<Reservation, RepositoryError> {
        let status: ReservationStatus = self.status.parse().map_err(RepositoryError::Query)?;

        Ok(Reservation {
            id: self.id,
            user_id: self.user_id,
            schedule_id: self.schedule_id,
            date: parse_date(&self.date)?,
            status,
            is_paid: self.is_paid,
            payment_date: self.payment_date.as_deref().map(parse_datetime).transpose()?,
            payment_confirmed_by: self.payment_confirmed_by,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_reservation(row: &SqliteRow) -> Result<Reservation, RepositoryError> {
    ReservationRow::from_row(row)
        .map_err(query_error)?
        .into_reservation()
}

fn map_user_summary(row: &SqliteRow) -> Result<UserSummary, RepositoryError> {
    Ok(UserSummary {
        id: row.try_get("u_id").map_err(query_error)?,
        name: row.try_get("u_name").map_err(query_error)?,
        email: row.try_get("u_email").map_err(query_error)?,
        phone: row.try_get("u_phone").map_err(query_error)?,
    })
}

fn map_payment(row: &SqliteRow) -> Result<PaymentRecord, RepositoryError> {
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    Ok(PaymentRecord {
        id: row.try_get("id").map_err(query_error)?,
        reservation_id: row.try_get("reservation_id").map_err(query_error)?,
        amount: row.try_get("amount").map_err(query_error)?,
        payment_method: row.try_get("payment_method").map_err(query_error)?,
        confirmed_by_id: row.try_get("confirmed_by_id").map_err(query_error)?,
        notes: row.try_get("notes").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Which joined relations a detail row carries.
#[derive(Clone, Copy)]
enum Relations {
    Schedule,
    UserAndSchedule,
}

fn map_detail(row: &SqliteRow, relations: Relations) -> Result<ReservationDetail, RepositoryError> {
    let user = match relations {
        Relations::UserAndSchedule => Some(map_user_summary(row)?),
        Relations::Schedule => None,
    };

    Ok(ReservationDetail {
        reservation: map_reservation(row)?,
        user,
        schedule: Some(map_schedule(row, "s_")?),
        payment_records: None,
    })
}

fn detail_select() -> String {
    format!(
        "SELECT r.*, u.id AS u_id, u.name AS u_name, u.email AS u_email, u.phone AS u_phone, \
         {SCHEDULE_COLUMNS_AS_S} \
         FROM reservations r \
         JOIN users u ON u.id = r.user_id \
         JOIN swimming_schedules s ON s.id = r.schedule_id"
    )
}

async fn fetch_reservation(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Reservation>, RepositoryError> {
    let row = sqlx::query("SELECT * FROM reservations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(map_reservation).transpose()
}

async fn fetch_detail(
    pool: &SqlitePool,
    id: i64,
    relations: Relations,
) -> Result<Option<ReservationDetail>, RepositoryError> {
    let sql = format!("{} WHERE r.id = ?", detail_select());
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(|r| map_detail(r, relations)).transpose()
}

impl ReservationRepository for SqliteReservationRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>, RepositoryError> {
        fetch_reservation(&self.pool.reader, id).await
    }

    async fn get_detail(&self, id: i64) -> Result<Option<ReservationDetail>, RepositoryError> {
        let Some(mut detail) = fetch_detail(&self.pool.reader, id, Relations::UserAndSchedule).await?
        else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT * FROM payment_records WHERE reservation_id = ? ORDER BY created_at, id",
        )
        .bind(id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        detail.payment_records = Some(rows.iter().map(map_payment).collect::<Result<_, _>>()?);
        Ok(Some(detail))
    }

    async fn list(&self, filter: &ReservationFilter) -> Result<Vec<ReservationDetail>, RepositoryError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(detail_select());
        query.push(" WHERE 1 = 1");

        if let Some(status) = filter.status {
            query.push(" AND r.status = ").push_bind(status.to_string());
        }
        if let Some(date) = filter.date {
            query.push(" AND r.date = ").push_bind(format_date(date));
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND r.user_id = ").push_bind(user_id);
        }
        query.push(" ORDER BY r.date, r.created_at, r.id");

        let rows = query
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|r| map_detail(r, Relations::UserAndSchedule))
            .collect()
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<ReservationDetail>, RepositoryError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(detail_select());
        query.push(" WHERE r.user_id = ").push_bind(user_id);
        if let Some(status) = status {
            query.push(" AND r.status = ").push_bind(status.to_string());
        }
        query.push(" ORDER BY r.date, r.id");

        let rows = query
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|r| map_detail(r, Relations::Schedule))
            .collect()
    }

    async fn count_for_schedule(&self, schedule_id: i64) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE schedule_id = ?")
                .bind(schedule_id)
                .fetch_one(&self.pool.reader)
                .await
                .map_err(query_error)?;
        Ok(count)
    }

    async fn count_active(&self, schedule_id: i64, date: NaiveDate) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reservations WHERE schedule_id = ? AND date = ? AND status != 'CANCELLED'",
        )
        .bind(schedule_id)
        .bind(format_date(date))
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_error)?;
        Ok(count)
    }

    async fn book(
        &self,
        reservation: &NewReservation,
        capacity: i64,
    ) -> Result<BookingOutcome, RepositoryError> {
        let date = format_date(reservation.date);
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let (taken,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reservations WHERE schedule_id = ? AND date = ? AND status != 'CANCELLED'",
        )
        .bind(reservation.schedule_id)
        .bind(&date)
        .fetch_one(&mut *tx)
        .await
        .map_err(query_error)?;

        if taken >= capacity {
            return Ok(BookingOutcome::Full);
        }

        let (held,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reservations
             WHERE user_id = ? AND schedule_id = ? AND date = ? AND status != 'CANCELLED'",
        )
        .bind(reservation.user_id)
        .bind(reservation.schedule_id)
        .bind(&date)
        .fetch_one(&mut *tx)
        .await
        .map_err(query_error)?;

        if held > 0 {
            return Ok(BookingOutcome::Duplicate);
        }

        let now = format_datetime(&Utc::now());
        let id = sqlx::query(
            "INSERT INTO reservations (user_id, schedule_id, date, status, is_paid, created_at, updated_at)
             VALUES (?, ?, ?, 'PENDING', 0, ?, ?)",
        )
        .bind(reservation.user_id)
        .bind(reservation.schedule_id)
        .bind(&date)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?
        .last_insert_rowid();

        tx.commit().await.map_err(query_error)?;

        let detail = fetch_detail(&self.pool.writer, id, Relations::Schedule)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(BookingOutcome::Created(detail))
    }

    async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<ReservationDetail, RepositoryError> {
        let result = sqlx::query("UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(format_datetime(&Utc::now()))
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        fetch_detail(&self.pool.writer, id, Relations::Schedule)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn confirm_payment(
        &self,
        id: i64,
        status: ReservationStatus,
        payment: &NewPayment,
    ) -> Result<Reservation, RepositoryError> {
        let now = format_datetime(&Utc::now());
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            "UPDATE reservations
             SET is_paid = 1, payment_date = ?, payment_confirmed_by = ?, status = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&now)
        .bind(payment.confirmed_by_id)
        .bind(status.to_string())
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            "INSERT INTO payment_records (reservation_id, amount, payment_method, confirmed_by_id, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(payment.amount)
        .bind(&payment.payment_method)
        .bind(payment.confirmed_by_id)
        .bind(&payment.notes)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        fetch_reservation(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
