use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::booking::{Booking, BookingState, PaymentStatus};
use crate::domain::models::calendar_event::CalendarEvent;
use crate::domain::ports::{
    AppointmentTypeRepository, BookingRepository, CalendarEventRepository, EmailService,
    ResourceRepository, SlotRepository,
};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tera::Tera;
use tracing::{info, warn};

/// Drives a booking through draft -> confirmed -> done, with cancellation
/// from draft/confirmed and manual reopening from cancelled. Owns the side
/// effects: calendar event, notification mails, slot recomputation.
pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    type_repo: Arc<dyn AppointmentTypeRepository>,
    slot_repo: Arc<dyn SlotRepository>,
    resource_repo: Arc<dyn ResourceRepository>,
    calendar_repo: Arc<dyn CalendarEventRepository>,
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        type_repo: Arc<dyn AppointmentTypeRepository>,
        slot_repo: Arc<dyn SlotRepository>,
        resource_repo: Arc<dyn ResourceRepository>,
        calendar_repo: Arc<dyn CalendarEventRepository>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
    ) -> Self {
        Self {
            booking_repo,
            type_repo,
            slot_repo,
            resource_repo,
            calendar_repo,
            email_service,
            templates,
        }
    }

    async fn load_type(&self, booking: &Booking) -> Result<AppointmentType, AppError> {
        self.type_repo
            .find_by_id(&booking.appointment_type_id)
            .await?
            .ok_or(AppError::NotFound("Appointment type not found".into()))
    }

    async fn recompute_slot(&self, booking: &Booking) -> Result<(), AppError> {
        if let Some(slot_id) = &booking.slot_id {
            self.slot_repo.recompute(slot_id).await?;
        }
        Ok(())
    }

    /// Confirm a draft booking. No-op in any other state. Creates at most one
    /// calendar event for the time range and sends the confirmation mail.
    pub async fn confirm(&self, booking: &Booking) -> Result<Booking, AppError> {
        if booking.state != BookingState::Draft {
            return Ok(booking.clone());
        }

        let appointment_type = self.load_type(booking).await?;
        if appointment_type.require_payment && booking.payment_status != PaymentStatus::Paid {
            return Err(AppError::Conflict(
                "Payment is required before confirming this booking".into(),
            ));
        }

        let mut updated = booking.clone();

        if updated.calendar_event_id.is_none() {
            let resource_name = match &updated.resource_id {
                Some(id) => self.resource_repo.find_by_id(id).await?.map(|r| r.name),
                None => None,
            };
            let event = CalendarEvent::new(
                updated.company_id.clone(),
                format!("{} - {}", appointment_type.name, updated.guest_name),
                updated.event_description(resource_name.as_deref()),
                updated.start_datetime,
                updated.end_datetime,
                updated.staff_user_id.clone(),
            );
            let created = self.calendar_repo.create(&event).await?;
            updated.calendar_event_id = Some(created.id);
        }

        updated.state = BookingState::Confirmed;
        let updated = self.booking_repo.update(&updated).await?;
        self.recompute_slot(&updated).await?;

        info!("Booking confirmed: {}", updated.reference);
        self.send_notification(&appointment_type, &updated, "confirmation")
            .await;
        Ok(updated)
    }

    /// Mark a confirmed booking as done. No-op in any other state.
    pub async fn done(&self, booking: &Booking) -> Result<Booking, AppError> {
        if booking.state != BookingState::Confirmed {
            return Ok(booking.clone());
        }
        let mut updated = booking.clone();
        updated.state = BookingState::Done;
        let updated = self.booking_repo.update(&updated).await?;
        self.recompute_slot(&updated).await?;
        Ok(updated)
    }

    /// Cancel a draft or confirmed booking, enforcing the cancellation
    /// deadline and detaching the calendar event. Cancelling an already
    /// cancelled booking is a no-op; a done booking cannot be cancelled.
    pub async fn cancel(&self, booking: &Booking) -> Result<Booking, AppError> {
        match booking.state {
            BookingState::Cancelled => return Ok(booking.clone()),
            BookingState::Done => {
                return Err(AppError::Conflict(
                    "A completed booking can no longer be cancelled".into(),
                ))
            }
            BookingState::Draft | BookingState::Confirmed => {}
        }

        let appointment_type = self.load_type(booking).await?;
        if appointment_type.cancel_before_hours > 0.0 {
            let deadline = booking.start_datetime
                - Duration::seconds((appointment_type.cancel_before_hours * 3600.0).round() as i64);
            if Utc::now() > deadline {
                return Err(AppError::Conflict(format!(
                    "Cancellation is only allowed until {} hours before the appointment",
                    appointment_type.cancel_before_hours
                )));
            }
        }

        let mut updated = booking.clone();
        if let Some(event_id) = updated.calendar_event_id.take() {
            self.calendar_repo.delete(&event_id).await?;
        }
        updated.state = BookingState::Cancelled;
        let updated = self.booking_repo.update(&updated).await?;
        self.recompute_slot(&updated).await?;

        info!("Booking cancelled: {}", updated.reference);
        self.send_notification(&appointment_type, &updated, "cancellation")
            .await;
        Ok(updated)
    }

    /// Reopen a cancelled booking as a draft. No-op in any other state.
    pub async fn reopen(&self, booking: &Booking) -> Result<Booking, AppError> {
        if booking.state != BookingState::Cancelled {
            return Ok(booking.clone());
        }
        let mut updated = booking.clone();
        updated.state = BookingState::Draft;
        let updated = self.booking_repo.update(&updated).await?;
        Ok(updated)
    }

    /// Payment completion callback. Records the paid status and transaction
    /// reference, then auto-confirms when the type asks for it. A failing
    /// auto-confirm is logged and swallowed: payment capture never fails
    /// because of a downstream confirmation error.
    pub async fn payment_completed(
        &self,
        booking_id: &str,
        transaction_ref: &str,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        let mut updated = booking.clone();
        updated.payment_status = PaymentStatus::Paid;
        updated.payment_transaction_ref = Some(transaction_ref.to_string());
        let updated = self.booking_repo.update(&updated).await?;

        let appointment_type = self.load_type(&updated).await?;
        if appointment_type.auto_confirm {
            match self.confirm(&updated).await {
                Ok(confirmed) => return Ok(confirmed),
                Err(e) => {
                    warn!(
                        "Auto-confirm after payment failed for booking {}: {}",
                        updated.reference, e
                    );
                }
            }
        }
        Ok(updated)
    }

    /// A failed notification never undoes the state transition that
    /// triggered it; it is logged and the transition stands.
    async fn send_notification(
        &self,
        appointment_type: &AppointmentType,
        booking: &Booking,
        template: &str,
    ) {
        let mut context = tera::Context::new();
        context.insert("guest_name", &booking.guest_name);
        context.insert("reference", &booking.reference);
        context.insert("appointment_name", &appointment_type.name);
        context.insert(
            "start",
            &booking.start_datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        context.insert("guest_count", &booking.guest_count);

        let body = match self.templates.render(&format!("{}.html", template), &context) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to render {} template: {}", template, e);
                return;
            }
        };

        let (subject, attachment) = if template == "confirmation" {
            (
                format!("Booking confirmed: {}", booking.reference),
                Some(generate_ics(appointment_type, booking)),
            )
        } else {
            (format!("Booking cancelled: {}", booking.reference), None)
        };

        let result = self
            .email_service
            .send(
                &booking.guest_email,
                &subject,
                &body,
                attachment.as_ref().map(|_| "appointment.ics"),
                attachment.as_deref().map(str::as_bytes),
            )
            .await;
        if let Err(e) = result {
            warn!("Failed to send {} mail for {}: {}", template, booking.reference, e);
        }
    }
}
