use crate::domain::{
    models::question::{Question, QuestionOption},
    ports::QuestionRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteQuestionRepo {
    pool: SqlitePool,
}

impl SqliteQuestionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepo {
    async fn create(&self, question: &Question) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(
            "INSERT INTO questions (id, appointment_type_id, label, question_type, required, sequence, placeholder, help_text)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&question.id)
        .bind(&question.appointment_type_id)
        .bind(&question.label)
        .bind(question.question_type)
        .bind(question.required)
        .bind(question.sequence)
        .bind(&question.placeholder)
        .bind(&question.help_text)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<Question>, AppError> {
        sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE appointment_type_id = ? ORDER BY sequence, id",
        )
        .bind(appointment_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Question not found".into()));
        }
        Ok(())
    }

    async fn create_option(&self, option: &QuestionOption) -> Result<QuestionOption, AppError> {
        sqlx::query_as::<_, QuestionOption>(
            "INSERT INTO question_options (id, question_id, label, sequence)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&option.id)
        .bind(&option.question_id)
        .bind(&option.label)
        .bind(option.sequence)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_options(&self, question_id: &str) -> Result<Vec<QuestionOption>, AppError> {
        sqlx::query_as::<_, QuestionOption>(
            "SELECT * FROM question_options WHERE question_id = ? ORDER BY sequence, id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
