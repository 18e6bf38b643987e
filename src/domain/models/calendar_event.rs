use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Scheduling event mirroring a confirmed booking. Removed again when the
/// booking is cancelled.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CalendarEvent {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub description: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub staff_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        company_id: String,
        title: String,
        description: String,
        start_datetime: DateTime<Utc>,
        end_datetime: DateTime<Utc>,
        staff_user_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            title,
            description,
            start_datetime,
            end_datetime,
            staff_user_id,
            created_at: Utc::now(),
        }
    }
}
