use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Weekly recurring time window restricting when slots may exist.
/// Weekday follows the source convention: 0 = Monday .. 6 = Sunday.
/// An empty resource/staff scope applies the rule to everyone.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityRule {
    pub id: String,
    pub appointment_type_id: String,
    pub weekday: i32,
    pub hour_from: f64,
    pub hour_to: f64,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
}

impl AvailabilityRule {
    pub fn new(
        appointment_type_id: String,
        weekday: i32,
        hour_from: f64,
        hour_to: f64,
        resource_id: Option<String>,
        staff_user_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_type_id,
            weekday,
            hour_from,
            hour_to,
            resource_id,
            staff_user_id,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(0..=6).contains(&self.weekday) {
            return Err(AppError::Validation("Weekday must be between 0 and 6".into()));
        }
        if self.hour_from < 0.0 || self.hour_to > 24.0 {
            return Err(AppError::Validation("Hours must be between 0 and 24".into()));
        }
        if self.hour_from >= self.hour_to {
            return Err(AppError::Validation("Start time must be before end time".into()));
        }
        Ok(())
    }
}
