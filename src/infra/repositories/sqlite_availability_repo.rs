use crate::domain::{models::availability::AvailabilityRule, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn create(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "INSERT INTO availability_rules (id, appointment_type_id, weekday, hour_from, hour_to, resource_id, staff_user_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&rule.id)
        .bind(&rule.appointment_type_id)
        .bind(rule.weekday)
        .bind(rule.hour_from)
        .bind(rule.hour_to)
        .bind(&rule.resource_id)
        .bind(&rule.staff_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<AvailabilityRule>, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "SELECT * FROM availability_rules WHERE appointment_type_id = ? ORDER BY weekday, hour_from",
        )
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_rules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Availability rule not found".into()));
        }
        Ok(())
    }
}
