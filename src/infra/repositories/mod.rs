pub mod sqlite_answer_repo;
pub mod sqlite_availability_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_calendar_repo;
pub mod sqlite_company_repo;
pub mod sqlite_contact_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_question_repo;
pub mod sqlite_resource_repo;
pub mod sqlite_slot_repo;
pub mod sqlite_staff_repo;
pub mod sqlite_type_repo;
