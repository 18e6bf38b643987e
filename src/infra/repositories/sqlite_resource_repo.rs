use crate::domain::{models::resource::Resource, ports::ResourceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteResourceRepo {
    pool: SqlitePool,
}

impl SqliteResourceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for SqliteResourceRepo {
    async fn create(&self, resource: &Resource) -> Result<Resource, AppError> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (id, company_id, name, capacity, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&resource.id)
        .bind(&resource.company_id)
        .bind(&resource.name)
        .bind(resource.capacity)
        .bind(resource.active)
        .bind(resource.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, company_id: &str) -> Result<Vec<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE company_id = ? ORDER BY name")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, resource: &Resource) -> Result<Resource, AppError> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET name=?, capacity=?, active=? WHERE id=? AND company_id=? RETURNING *",
        )
        .bind(&resource.name)
        .bind(resource.capacity)
        .bind(resource.active)
        .bind(&resource.id)
        .bind(&resource.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn link_type(&self, resource_id: &str, appointment_type_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR IGNORE INTO appointment_type_resources (appointment_type_id, resource_id) VALUES (?, ?)",
        )
        .bind(appointment_type_id)
        .bind(resource_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<Resource>, AppError> {
        sqlx::query_as::<_, Resource>(
            "SELECT r.* FROM resources r
             JOIN appointment_type_resources tr ON tr.resource_id = r.id
             WHERE tr.appointment_type_id = ? AND r.active = 1
             ORDER BY r.name",
        )
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
