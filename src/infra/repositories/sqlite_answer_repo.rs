use crate::domain::{
    models::answer::{Answer, AnswerValue},
    ports::AnswerRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

pub struct SqliteAnswerRepo {
    pool: SqlitePool,
}

impl SqliteAnswerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// The typed value is persisted as a JSON column, so rows are mapped by hand.
fn map_row(row: SqliteRow) -> Result<Answer, AppError> {
    let value_json: String = row.get("value_json");
    let value: AnswerValue = serde_json::from_str(&value_json)
        .map_err(|e| AppError::Internal(format!("Corrupt answer payload: {e}")))?;
    Ok(Answer {
        id: row.get("id"),
        booking_id: row.get("booking_id"),
        question_id: row.get("question_id"),
        value,
    })
}

#[async_trait]
impl AnswerRepository for SqliteAnswerRepo {
    async fn create(&self, answer: &Answer) -> Result<Answer, AppError> {
        let value_json = serde_json::to_string(&answer.value)
            .map_err(|e| AppError::Internal(format!("Unserializable answer payload: {e}")))?;
        let row = sqlx::query(
            "INSERT INTO answers (id, booking_id, question_id, value_json)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&answer.id)
        .bind(&answer.booking_id)
        .bind(&answer.question_id)
        .bind(value_json)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        map_row(row)
    }

    async fn list_by_booking(&self, booking_id: &str) -> Result<Vec<Answer>, AppError> {
        let rows = sqlx::query("SELECT * FROM answers WHERE booking_id = ? ORDER BY id")
            .bind(booking_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        rows.into_iter().map(map_row).collect()
    }
}
