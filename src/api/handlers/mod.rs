pub mod appointment_type;
pub mod availability;
pub mod booking_admin;
pub mod company;
pub mod guest;
pub mod health;
pub mod payment;
pub mod question;
pub mod resource;
pub mod slot;
pub mod staff;
