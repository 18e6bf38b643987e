use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, timezone: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            timezone,
            created_at: Utc::now(),
        }
    }
}

/// Guest contact record, looked up or created by email at booking time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Contact {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(company_id: String, name: String, email: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            email,
            phone,
            created_at: Utc::now(),
        }
    }
}
