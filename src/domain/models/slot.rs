use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SlotState {
    Available,
    Partial,
    Full,
    Closed,
}

/// Materialized bookable time window. booked_count / available_count / state
/// are derived from the confirmed and done bookings linked to the slot and
/// recomputed whenever one of them changes.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AppointmentSlot {
    pub id: String,
    pub appointment_type_id: String,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub capacity: i32,
    pub booked_count: i32,
    pub available_count: i32,
    pub state: SlotState,
}

impl AppointmentSlot {
    pub fn new(
        appointment_type_id: String,
        resource_id: Option<String>,
        staff_user_id: Option<String>,
        start_datetime: DateTime<Utc>,
        end_datetime: DateTime<Utc>,
        capacity: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_type_id,
            resource_id,
            staff_user_id,
            start_datetime,
            end_datetime,
            capacity,
            booked_count: 0,
            available_count: capacity,
            state: SlotState::Available,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.end_datetime <= self.start_datetime {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        if self.capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        Ok(())
    }

    pub fn is_available(&self, guest_count: i32) -> bool {
        self.available_count >= guest_count
    }
}
