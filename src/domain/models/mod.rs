pub mod answer;
pub mod appointment_type;
pub mod availability;
pub mod booking;
pub mod calendar_event;
pub mod company;
pub mod payment;
pub mod question;
pub mod resource;
pub mod slot;
