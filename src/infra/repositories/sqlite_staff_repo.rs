use crate::domain::{models::resource::StaffUser, ports::StaffRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteStaffRepo {
    pool: SqlitePool,
}

impl SqliteStaffRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for SqliteStaffRepo {
    async fn create(&self, staff: &StaffUser) -> Result<StaffUser, AppError> {
        sqlx::query_as::<_, StaffUser>(
            "INSERT INTO staff_users (id, company_id, name, email, resource_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&staff.id)
        .bind(&staff.company_id)
        .bind(&staff.name)
        .bind(&staff.email)
        .bind(&staff.resource_id)
        .bind(staff.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StaffUser>, AppError> {
        sqlx::query_as::<_, StaffUser>("SELECT * FROM staff_users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, company_id: &str) -> Result<Vec<StaffUser>, AppError> {
        sqlx::query_as::<_, StaffUser>("SELECT * FROM staff_users WHERE company_id = ? ORDER BY name")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn link_type(&self, staff_user_id: &str, appointment_type_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR IGNORE INTO appointment_type_staff (appointment_type_id, staff_user_id) VALUES (?, ?)",
        )
        .bind(appointment_type_id)
        .bind(staff_user_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<StaffUser>, AppError> {
        sqlx::query_as::<_, StaffUser>(
            "SELECT s.* FROM staff_users s
             JOIN appointment_type_staff ts ON ts.staff_user_id = s.id
             WHERE ts.appointment_type_id = ?
             ORDER BY s.name",
        )
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
