use crate::error::AppError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Category {
    Meeting,
    VideoCall,
    Table,
    Resource,
    PaidConsultation,
    PaidSeat,
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum LocationType {
    Online,
    Physical,
}

/// A bookable service template: duration, capacity, payment and the
/// questions asked at booking time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AppointmentType {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub category: Category,
    pub description: Option<String>,
    pub location_type: LocationType,
    pub location_address: Option<String>,
    pub video_link: Option<String>,
    pub sequence: i32,
    pub active: bool,
    pub is_published: bool,
    /// Slot length in hours.
    pub slot_duration: f64,
    /// Step between candidate slots in hours; falls back to slot_duration.
    pub slot_interval: Option<f64>,
    pub max_booking_days: i32,
    pub min_booking_hours: f64,
    pub cancel_before_hours: f64,
    pub manage_capacity: bool,
    pub auto_confirm: bool,
    pub auto_confirm_capacity_percent: i32,
    pub require_payment: bool,
    pub payment_amount: f64,
    pub payment_per_person: bool,
    pub currency: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl AppointmentType {
    pub fn interval_hours(&self) -> f64 {
        match self.slot_interval {
            Some(i) if i > 0.0 => i,
            _ => self.slot_duration,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.slot_duration <= 0.0 {
            return Err(AppError::Validation(
                "Slot duration must be greater than 0".into(),
            ));
        }
        if self.max_booking_days < 1 {
            return Err(AppError::Validation(
                "Maximum booking days must be at least 1".into(),
            ));
        }
        if !(0..=100).contains(&self.auto_confirm_capacity_percent) {
            return Err(AppError::Validation(
                "Auto confirm capacity must be between 0 and 100".into(),
            ));
        }
        if self.timezone.parse::<Tz>().is_err() {
            return Err(AppError::Validation("Invalid timezone".into()));
        }
        Ok(())
    }
}
