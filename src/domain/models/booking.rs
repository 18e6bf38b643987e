use crate::error::AppError;
use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingState {
    Draft,
    Confirmed,
    Done,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentStatus {
    NotRequired,
    Pending,
    Paid,
    Refunded,
}

/// A guest reservation against a time window. Cancellation is a state, not a
/// deletion; the access token permits guest self-service without an account.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub reference: String,
    pub company_id: String,
    pub appointment_type_id: String,
    pub slot_id: Option<String>,
    pub contact_id: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub guest_count: i32,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub calendar_event_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_amount: f64,
    pub payment_transaction_ref: Option<String>,
    pub state: BookingState,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub company_id: String,
    pub appointment_type_id: String,
    pub slot_id: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub guest_count: i32,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let access_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            reference: format!("APT-{}", suffix),
            company_id: params.company_id,
            appointment_type_id: params.appointment_type_id,
            slot_id: params.slot_id,
            contact_id: None,
            guest_name: params.guest_name,
            guest_email: params.guest_email,
            guest_phone: params.guest_phone,
            guest_count: params.guest_count,
            resource_id: params.resource_id,
            staff_user_id: params.staff_user_id,
            start_datetime: params.start,
            end_datetime: params.end,
            calendar_event_id: None,
            payment_status: PaymentStatus::NotRequired,
            payment_amount: 0.0,
            payment_transaction_ref: None,
            state: BookingState::Draft,
            notes: params.notes,
            internal_notes: None,
            access_token,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.end_datetime <= self.start_datetime {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        if self.guest_count < 1 {
            return Err(AppError::Validation("Number of guests must be at least 1".into()));
        }
        Ok(())
    }

    pub fn duration_hours(&self) -> f64 {
        (self.end_datetime - self.start_datetime).num_seconds() as f64 / 3600.0
    }

    /// Description attached to the calendar event created on confirmation.
    pub fn event_description(&self, resource_name: Option<&str>) -> String {
        let mut lines = vec![format!("Guest: {}", self.guest_name)];
        lines.push(format!("Email: {}", self.guest_email));
        if let Some(phone) = &self.guest_phone {
            lines.push(format!("Phone: {}", phone));
        }
        if self.guest_count > 1 {
            lines.push(format!("Number of guests: {}", self.guest_count));
        }
        if let Some(name) = resource_name {
            lines.push(format!("Resource: {}", name));
        }
        if let Some(notes) = &self.notes {
            lines.push(format!("\nNotes: {}", notes));
        }
        lines.join("\n")
    }

    /// Constant-time comparison of the guest access token.
    pub fn token_matches(&self, candidate: &str) -> bool {
        let a = self.access_token.as_bytes();
        let b = candidate.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}
