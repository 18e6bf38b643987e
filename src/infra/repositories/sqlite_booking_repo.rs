use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const INSERT_SQL: &str = "INSERT INTO bookings (id, reference, company_id, appointment_type_id, slot_id, contact_id, guest_name, guest_email, guest_phone, guest_count, resource_id, staff_user_id, start_datetime, end_datetime, calendar_event_id, payment_status, payment_amount, payment_transaction_ref, state, notes, internal_notes, access_token, created_at)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
     RETURNING *";

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_checked(&self, booking: &Booking, capacity: i32) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // `IS ?` matches NULL against NULL, so an unscoped booking only counts
        // against other unscoped bookings.
        let taken: i64 = sqlx::query(
            "SELECT COALESCE(SUM(guest_count), 0) AS taken FROM bookings
             WHERE appointment_type_id = ? AND start_datetime = ?
               AND resource_id IS ? AND staff_user_id IS ?
               AND state IN ('confirmed', 'done')",
        )
        .bind(&booking.appointment_type_id)
        .bind(booking.start_datetime)
        .bind(&booking.resource_id)
        .bind(&booking.staff_user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .get("taken");

        if capacity - (taken as i32) < booking.guest_count {
            return Err(AppError::Conflict(
                "Selected time slot is no longer available".into(),
            ));
        }

        let created = sqlx::query_as::<_, Booking>(INSERT_SQL)
            .bind(&booking.id)
            .bind(&booking.reference)
            .bind(&booking.company_id)
            .bind(&booking.appointment_type_id)
            .bind(&booking.slot_id)
            .bind(&booking.contact_id)
            .bind(&booking.guest_name)
            .bind(&booking.guest_email)
            .bind(&booking.guest_phone)
            .bind(booking.guest_count)
            .bind(&booking.resource_id)
            .bind(&booking.staff_user_id)
            .bind(booking.start_datetime)
            .bind(booking.end_datetime)
            .bind(&booking.calendar_event_id)
            .bind(booking.payment_status)
            .bind(booking.payment_amount)
            .bind(&booking.payment_transaction_ref)
            .bind(booking.state)
            .bind(&booking.notes)
            .bind(&booking.internal_notes)
            .bind(&booking.access_token)
            .bind(booking.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_type(&self, company_id: &str, appointment_type_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE company_id = ? AND appointment_type_id = ? ORDER BY start_datetime DESC",
        )
        .bind(company_id)
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_company(&self, company_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE company_id = ? ORDER BY start_datetime DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET slot_id=?, contact_id=?, guest_name=?, guest_email=?, guest_phone=?, guest_count=?, resource_id=?, staff_user_id=?, start_datetime=?, end_datetime=?, calendar_event_id=?, payment_status=?, payment_amount=?, payment_transaction_ref=?, state=?, notes=?, internal_notes=?
             WHERE id=?
             RETURNING *",
        )
        .bind(&booking.slot_id)
        .bind(&booking.contact_id)
        .bind(&booking.guest_name)
        .bind(&booking.guest_email)
        .bind(&booking.guest_phone)
        .bind(booking.guest_count)
        .bind(&booking.resource_id)
        .bind(&booking.staff_user_id)
        .bind(booking.start_datetime)
        .bind(booking.end_datetime)
        .bind(&booking.calendar_event_id)
        .bind(booking.payment_status)
        .bind(booking.payment_amount)
        .bind(&booking.payment_transaction_ref)
        .bind(booking.state)
        .bind(&booking.notes)
        .bind(&booking.internal_notes)
        .bind(&booking.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn count_active_at(
        &self,
        appointment_type_id: &str,
        start: DateTime<Utc>,
        resource_id: Option<&str>,
        staff_user_id: Option<&str>,
    ) -> Result<i64, AppError> {
        let taken: i64 = sqlx::query(
            "SELECT COALESCE(SUM(guest_count), 0) AS taken FROM bookings
             WHERE appointment_type_id = ? AND start_datetime = ?
               AND resource_id IS ? AND staff_user_id IS ?
               AND state IN ('confirmed', 'done')",
        )
        .bind(appointment_type_id)
        .bind(start)
        .bind(resource_id)
        .bind(staff_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?
        .get("taken");
        Ok(taken)
    }

    async fn count_by_type(&self, appointment_type_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM bookings WHERE appointment_type_id = ?")
            .bind(appointment_type_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?
            .get("count");
        Ok(count)
    }
}
