use crate::config::Config;
use crate::domain::ports::{
    AnswerRepository, AppointmentTypeRepository, AvailabilityRepository, BookingRepository,
    CalendarEventRepository, CompanyRepository, ContactRepository, EmailService,
    PaymentProviderRepository, QuestionRepository, ResourceRepository, SlotRepository,
    StaffRepository,
};
use crate::domain::services::lifecycle::BookingService;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub type_repo: Arc<dyn AppointmentTypeRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub resource_repo: Arc<dyn ResourceRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub question_repo: Arc<dyn QuestionRepository>,
    pub answer_repo: Arc<dyn AnswerRepository>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub calendar_repo: Arc<dyn CalendarEventRepository>,
    pub payment_provider_repo: Arc<dyn PaymentProviderRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub booking_service: Arc<BookingService>,
    pub templates: Arc<Tera>,
}
