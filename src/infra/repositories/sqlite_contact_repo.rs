use crate::domain::{models::company::Contact, ports::ContactRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteContactRepo {
    pool: SqlitePool,
}

impl SqliteContactRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepo {
    async fn find_by_email(&self, company_id: &str, email: &str) -> Result<Option<Contact>, AppError> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE company_id = ? AND email = ?")
            .bind(company_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, contact: &Contact) -> Result<Contact, AppError> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (id, company_id, name, email, phone, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&contact.id)
        .bind(&contact.company_id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
