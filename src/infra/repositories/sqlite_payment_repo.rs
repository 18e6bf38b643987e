use crate::domain::{models::payment::PaymentProvider, ports::PaymentProviderRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentProviderRepository for SqlitePaymentRepo {
    async fn create(&self, provider: &PaymentProvider) -> Result<PaymentProvider, AppError> {
        sqlx::query_as::<_, PaymentProvider>(
            "INSERT INTO payment_providers (id, company_id, name, code, enabled)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&provider.id)
        .bind(&provider.company_id)
        .bind(&provider.name)
        .bind(&provider.code)
        .bind(provider.enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list(&self, company_id: &str) -> Result<Vec<PaymentProvider>, AppError> {
        sqlx::query_as::<_, PaymentProvider>(
            "SELECT * FROM payment_providers WHERE company_id = ? ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_enabled(&self, company_id: &str) -> Result<Vec<PaymentProvider>, AppError> {
        sqlx::query_as::<_, PaymentProvider>(
            "SELECT * FROM payment_providers WHERE company_id = ? AND enabled = 1 ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
