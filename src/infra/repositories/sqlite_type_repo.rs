use crate::domain::{models::appointment_type::AppointmentType, ports::AppointmentTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTypeRepo {
    pool: SqlitePool,
}

impl SqliteTypeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentTypeRepository for SqliteTypeRepo {
    async fn create(&self, record: &AppointmentType) -> Result<AppointmentType, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "INSERT INTO appointment_types (id, company_id, name, category, description, location_type, location_address, video_link, sequence, active, is_published, slot_duration, slot_interval, max_booking_days, min_booking_hours, cancel_before_hours, manage_capacity, auto_confirm, auto_confirm_capacity_percent, require_payment, payment_amount, payment_per_person, currency, timezone, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&record.id).bind(&record.company_id).bind(&record.name).bind(record.category)
        .bind(&record.description).bind(record.location_type).bind(&record.location_address)
        .bind(&record.video_link).bind(record.sequence).bind(record.active).bind(record.is_published)
        .bind(record.slot_duration).bind(record.slot_interval).bind(record.max_booking_days)
        .bind(record.min_booking_hours).bind(record.cancel_before_hours).bind(record.manage_capacity)
        .bind(record.auto_confirm).bind(record.auto_confirm_capacity_percent).bind(record.require_payment)
        .bind(record.payment_amount).bind(record.payment_per_person).bind(&record.currency)
        .bind(&record.timezone).bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AppointmentType>, AppError> {
        sqlx::query_as::<_, AppointmentType>("SELECT * FROM appointment_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, company_id: &str) -> Result<Vec<AppointmentType>, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "SELECT * FROM appointment_types WHERE company_id = ? ORDER BY sequence, id",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_published(&self) -> Result<Vec<AppointmentType>, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "SELECT * FROM appointment_types WHERE is_published = 1 AND active = 1 ORDER BY sequence, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, record: &AppointmentType) -> Result<AppointmentType, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "UPDATE appointment_types SET name=?, category=?, description=?, location_type=?, location_address=?, video_link=?, sequence=?, active=?, is_published=?, slot_duration=?, slot_interval=?, max_booking_days=?, min_booking_hours=?, cancel_before_hours=?, manage_capacity=?, auto_confirm=?, auto_confirm_capacity_percent=?, require_payment=?, payment_amount=?, payment_per_person=?, currency=?, timezone=?
             WHERE id=? AND company_id=?
             RETURNING *",
        )
        .bind(&record.name).bind(record.category).bind(&record.description).bind(record.location_type)
        .bind(&record.location_address).bind(&record.video_link).bind(record.sequence)
        .bind(record.active).bind(record.is_published).bind(record.slot_duration)
        .bind(record.slot_interval).bind(record.max_booking_days).bind(record.min_booking_hours)
        .bind(record.cancel_before_hours).bind(record.manage_capacity).bind(record.auto_confirm)
        .bind(record.auto_confirm_capacity_percent).bind(record.require_payment)
        .bind(record.payment_amount).bind(record.payment_per_person).bind(&record.currency)
        .bind(&record.timezone)
        .bind(&record.id).bind(&record.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, company_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointment_types WHERE id = ? AND company_id = ?")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Appointment type not found".into()));
        }
        Ok(())
    }
}
