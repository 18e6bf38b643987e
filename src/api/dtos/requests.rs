use crate::domain::models::appointment_type::{Category, LocationType};
use crate::domain::models::question::QuestionType;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAppointmentTypeRequest {
    pub name: String,
    pub category: Category,
    pub description: Option<String>,
    pub location_type: LocationType,
    pub location_address: Option<String>,
    pub video_link: Option<String>,
    pub sequence: Option<i32>,
    pub is_published: Option<bool>,
    pub slot_duration: f64,
    pub slot_interval: Option<f64>,
    pub max_booking_days: Option<i32>,
    pub min_booking_hours: Option<f64>,
    pub cancel_before_hours: Option<f64>,
    pub manage_capacity: Option<bool>,
    pub auto_confirm: Option<bool>,
    pub auto_confirm_capacity_percent: Option<i32>,
    pub require_payment: Option<bool>,
    pub payment_amount: Option<f64>,
    pub payment_per_person: Option<bool>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentTypeRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub location_type: Option<LocationType>,
    pub location_address: Option<String>,
    pub video_link: Option<String>,
    pub sequence: Option<i32>,
    pub active: Option<bool>,
    pub is_published: Option<bool>,
    pub slot_duration: Option<f64>,
    pub slot_interval: Option<f64>,
    pub max_booking_days: Option<i32>,
    pub min_booking_hours: Option<f64>,
    pub cancel_before_hours: Option<f64>,
    pub manage_capacity: Option<bool>,
    pub auto_confirm: Option<bool>,
    pub auto_confirm_capacity_percent: Option<i32>,
    pub require_payment: Option<bool>,
    pub payment_amount: Option<f64>,
    pub payment_per_person: Option<bool>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAvailabilityRuleRequest {
    pub weekday: i32,
    pub hour_from: f64,
    pub hour_to: f64,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    pub capacity: i32,
}

#[derive(Deserialize)]
pub struct UpdateResourceRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub email: String,
    pub resource_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub label: String,
    pub question_type: QuestionType,
    pub required: Option<bool>,
    pub sequence: Option<i32>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub options: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreatePaymentProviderRequest {
    pub name: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct GenerateSlotsRequest {
    pub start_date: String,
    pub end_date: String,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SetSlotCapacityRequest {
    pub capacity: i32,
}

#[derive(Deserialize)]
pub struct AvailableSlotsQuery {
    pub start: String,
    pub end: String,
    pub resource_id: Option<String>,
    pub staff_user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct DaySlotsRequest {
    pub date: String,
    pub resource_id: Option<String>,
    pub staff_id: Option<String>,
}

#[derive(Deserialize)]
pub struct BookFormQuery {
    pub start_datetime: String,
    pub resource_id: Option<String>,
    pub staff_id: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct GuestBookRequest {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_count: Option<i32>,
    pub start_datetime: Option<String>,
    pub slot_id: Option<String>,
    pub resource_id: Option<String>,
    pub staff_id: Option<String>,
    pub notes: Option<String>,
    /// Raw answers keyed by question id, typed later per question kind.
    pub answers: Option<HashMap<String, Value>>,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct PaymentCompleteRequest {
    pub transaction_ref: String,
}
