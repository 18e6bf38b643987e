use crate::domain::{models::slot::AppointmentSlot, ports::SlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::cmp::max;

pub struct SqliteSlotRepo {
    pool: SqlitePool,
}

impl SqliteSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqliteSlotRepo {
    async fn create(&self, slot: &AppointmentSlot) -> Result<AppointmentSlot, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "INSERT INTO appointment_slots (id, appointment_type_id, resource_id, staff_user_id, start_datetime, end_datetime, capacity, booked_count, available_count, state)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&slot.id).bind(&slot.appointment_type_id).bind(&slot.resource_id)
        .bind(&slot.staff_user_id).bind(slot.start_datetime).bind(slot.end_datetime)
        .bind(slot.capacity).bind(slot.booked_count).bind(slot.available_count).bind(slot.state)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>("SELECT * FROM appointment_slots WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "SELECT * FROM appointment_slots WHERE appointment_type_id = ? ORDER BY start_datetime",
        )
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn get_available(
        &self,
        appointment_type_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resource_id: Option<&str>,
        staff_user_id: Option<&str>,
    ) -> Result<Vec<AppointmentSlot>, AppError> {
        sqlx::query_as::<_, AppointmentSlot>(
            "SELECT * FROM appointment_slots
             WHERE appointment_type_id = ?
               AND start_datetime >= ? AND start_datetime < ?
               AND state IN ('available', 'partial')
               AND (? IS NULL OR resource_id = ?)
               AND (? IS NULL OR staff_user_id = ?)
             ORDER BY start_datetime",
        )
        .bind(appointment_type_id)
        .bind(start)
        .bind(end)
        .bind(resource_id)
        .bind(resource_id)
        .bind(staff_user_id)
        .bind(staff_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn recompute(&self, slot_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let slot_row = sqlx::query("SELECT capacity, state FROM appointment_slots WHERE id = ?")
            .bind(slot_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let Some(slot_row) = slot_row else {
            return Ok(());
        };
        let capacity: i32 = slot_row.get("capacity");
        let current_state: String = slot_row.get("state");

        let booked: i64 = sqlx::query(
            "SELECT COALESCE(SUM(guest_count), 0) AS booked FROM bookings
             WHERE slot_id = ? AND state IN ('confirmed', 'done')",
        )
        .bind(slot_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .get("booked");

        let booked = booked as i32;
        let available = max(0, capacity - booked);
        // A manually closed slot stays closed regardless of its counts.
        let state = if current_state == "closed" {
            "closed"
        } else if available == 0 {
            "full"
        } else if booked > 0 {
            "partial"
        } else {
            "available"
        };

        sqlx::query(
            "UPDATE appointment_slots SET booked_count = ?, available_count = ?, state = ? WHERE id = ?",
        )
        .bind(booked)
        .bind(available)
        .bind(state)
        .bind(slot_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)
    }

    async fn set_capacity(&self, slot_id: &str, capacity: i32) -> Result<(), AppError> {
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        let result = sqlx::query("UPDATE appointment_slots SET capacity = ? WHERE id = ?")
            .bind(capacity)
            .bind(slot_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot not found".into()));
        }
        self.recompute(slot_id).await
    }

    async fn close(&self, slot_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE appointment_slots SET state = 'closed' WHERE id = ?")
            .bind(slot_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot not found".into()));
        }
        Ok(())
    }
}
