use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::booking::Booking;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Generates an iCalendar (.ics) string for a confirmed booking, attached to
/// the confirmation email.
pub fn generate_ics(appointment_type: &AppointmentType, booking: &Booking) -> String {
    let mut calendar = Calendar::new();

    let location = appointment_type
        .location_address
        .clone()
        .or_else(|| appointment_type.video_link.clone())
        .unwrap_or_default();

    let ical_event = IcalEvent::new()
        .summary(&format!("{} - {}", appointment_type.name, booking.guest_name))
        .description(appointment_type.description.as_deref().unwrap_or(""))
        .location(&location)
        .starts(booking.start_datetime)
        .ends(booking.end_datetime)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
