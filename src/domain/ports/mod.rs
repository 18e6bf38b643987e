use crate::domain::models::{
    answer::Answer,
    appointment_type::AppointmentType,
    availability::AvailabilityRule,
    booking::Booking,
    calendar_event::CalendarEvent,
    company::{Company, Contact},
    payment::PaymentProvider,
    question::{Question, QuestionOption},
    resource::{Resource, StaffUser},
    slot::AppointmentSlot,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> Result<Company, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError>;
}

#[async_trait]
pub trait AppointmentTypeRepository: Send + Sync {
    async fn create(&self, record: &AppointmentType) -> Result<AppointmentType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<AppointmentType>, AppError>;
    async fn list(&self, company_id: &str) -> Result<Vec<AppointmentType>, AppError>;
    /// Published and active types, the guest-facing listing.
    async fn list_published(&self) -> Result<Vec<AppointmentType>, AppError>;
    async fn update(&self, record: &AppointmentType) -> Result<AppointmentType, AppError>;
    /// Hard delete; callers must refuse it while bookings reference the type.
    async fn delete(&self, company_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError>;
    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<AvailabilityRule>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn create(&self, resource: &Resource) -> Result<Resource, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Resource>, AppError>;
    async fn list(&self, company_id: &str) -> Result<Vec<Resource>, AppError>;
    async fn update(&self, resource: &Resource) -> Result<Resource, AppError>;
    async fn link_type(&self, resource_id: &str, appointment_type_id: &str) -> Result<(), AppError>;
    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<Resource>, AppError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn create(&self, staff: &StaffUser) -> Result<StaffUser, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<StaffUser>, AppError>;
    async fn list(&self, company_id: &str) -> Result<Vec<StaffUser>, AppError>;
    async fn link_type(&self, staff_user_id: &str, appointment_type_id: &str) -> Result<(), AppError>;
    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<StaffUser>, AppError>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, slot: &AppointmentSlot) -> Result<AppointmentSlot, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<AppointmentSlot>, AppError>;
    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<AppointmentSlot>, AppError>;
    /// Slots in state available/partial within the range, optionally narrowed
    /// to one resource or staff member.
    async fn get_available(
        &self,
        appointment_type_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resource_id: Option<&str>,
        staff_user_id: Option<&str>,
    ) -> Result<Vec<AppointmentSlot>, AppError>;
    /// Re-derive booked_count/available_count/state from the linked bookings.
    async fn recompute(&self, slot_id: &str) -> Result<(), AppError>;
    async fn set_capacity(&self, slot_id: &str, capacity: i32) -> Result<(), AppError>;
    async fn close(&self, slot_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Capacity-checked insert: counts confirmed/done bookings for the same
    /// type/resource/staff/start inside the same transaction as the insert,
    /// so concurrent submissions cannot oversell the window.
    async fn create_checked(&self, booking: &Booking, capacity: i32) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_type(&self, company_id: &str, appointment_type_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_company(&self, company_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Confirmed/done bookings sharing the exact start and scope; feeds the
    /// on-demand availability count.
    async fn count_active_at(
        &self,
        appointment_type_id: &str,
        start: DateTime<Utc>,
        resource_id: Option<&str>,
        staff_user_id: Option<&str>,
    ) -> Result<i64, AppError>;
    async fn count_by_type(&self, appointment_type_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: &Question) -> Result<Question, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Question>, AppError>;
    async fn list_by_type(&self, appointment_type_id: &str) -> Result<Vec<Question>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn create_option(&self, option: &QuestionOption) -> Result<QuestionOption, AppError>;
    async fn list_options(&self, question_id: &str) -> Result<Vec<QuestionOption>, AppError>;
}

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn create(&self, answer: &Answer) -> Result<Answer, AppError>;
    async fn list_by_booking(&self, booking_id: &str) -> Result<Vec<Answer>, AppError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn find_by_email(&self, company_id: &str, email: &str) -> Result<Option<Contact>, AppError>;
    async fn create(&self, contact: &Contact) -> Result<Contact, AppError>;
}

#[async_trait]
pub trait CalendarEventRepository: Send + Sync {
    async fn create(&self, event: &CalendarEvent) -> Result<CalendarEvent, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentProviderRepository: Send + Sync {
    async fn create(&self, provider: &PaymentProvider) -> Result<PaymentProvider, AppError>;
    async fn list(&self, company_id: &str) -> Result<Vec<PaymentProvider>, AppError>;
    async fn list_enabled(&self, company_id: &str) -> Result<Vec<PaymentProvider>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError>;
}
