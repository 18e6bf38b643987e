use crate::domain::{models::calendar_event::CalendarEvent, ports::CalendarEventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCalendarRepo {
    pool: SqlitePool,
}

impl SqliteCalendarRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarEventRepository for SqliteCalendarRepo {
    async fn create(&self, event: &CalendarEvent) -> Result<CalendarEvent, AppError> {
        sqlx::query_as::<_, CalendarEvent>(
            "INSERT INTO calendar_events (id, company_id, title, description, start_datetime, end_datetime, staff_user_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&event.id)
        .bind(&event.company_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_datetime)
        .bind(event.end_datetime)
        .bind(&event.staff_user_id)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // Deleting an already removed event is not an error; cancellation may
        // race with manual cleanup.
        sqlx::query("DELETE FROM calendar_events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
