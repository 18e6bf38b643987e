use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Bookable resource (table, room, court). Capacity is the maximum number
/// of concurrent bookings it can absorb.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Resource {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub capacity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Resource {
    pub fn new(company_id: String, name: String, capacity: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            capacity,
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Staff member offering appointments. The optional resource link supplies
/// the working-hours scope used during slot generation.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StaffUser {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub resource_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StaffUser {
    pub fn new(company_id: String, name: String, email: String, resource_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            email,
            resource_id,
            created_at: Utc::now(),
        }
    }
}
