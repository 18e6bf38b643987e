use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::booking::Booking;
use crate::domain::models::payment::PaymentProvider;
use crate::domain::models::question::{Question, QuestionOption};
use crate::domain::models::resource::{Resource, StaffUser};
use serde::Serialize;

#[derive(Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
}

#[derive(Serialize)]
pub struct TypeDetailResponse {
    pub appointment_type: AppointmentType,
    pub questions: Vec<QuestionWithOptions>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub appointment_type: AppointmentType,
    pub resources: Vec<Resource>,
    pub staff: Vec<StaffUser>,
    pub date_from: String,
    pub date_to: String,
}

#[derive(Serialize)]
pub struct DaySlot {
    pub start: String,
    pub end: String,
    pub start_time: String,
    pub end_time: String,
    pub available: i32,
}

#[derive(Serialize)]
pub struct DaySlotsResponse {
    pub date: String,
    pub slots: Vec<DaySlot>,
}

#[derive(Serialize)]
pub struct BookContextResponse {
    pub appointment_type: AppointmentType,
    pub questions: Vec<QuestionWithOptions>,
    pub start_datetime: String,
    pub end_datetime: String,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub booking: Booking,
    pub redirect: String,
}

#[derive(Serialize)]
pub struct AnswerView {
    pub question_id: String,
    pub label: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct BookingDetailResponse {
    pub booking: Booking,
    pub appointment_type: AppointmentType,
    pub answers: Vec<AnswerView>,
}

#[derive(Serialize)]
pub struct CancelResultResponse {
    pub booking: Booking,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct PayPageResponse {
    pub booking: Booking,
    pub providers: Vec<PaymentProvider>,
    pub amount: f64,
    pub currency: String,
}

#[derive(Serialize)]
pub struct SlotsGeneratedResponse {
    pub created: usize,
}
