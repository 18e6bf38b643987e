use crate::api::handlers::{
    appointment_type, availability, booking_admin, company, guest, health, payment, question,
    resource, slot, staff,
};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Guest booking flow
        .route("/appointment", get(guest::list_published))
        .route("/appointment/{type_id}", get(guest::type_detail))
        .route("/appointment/{type_id}/schedule", get(guest::schedule))
        .route("/appointment/{type_id}/slots", post(guest::day_slots))
        .route("/appointment/{type_id}/book", get(guest::book_form).post(guest::book))
        .route("/appointment/booking/{booking_id}/confirm", get(guest::booking_confirmed))
        .route("/appointment/booking/{booking_id}", get(guest::booking_detail))
        .route("/appointment/booking/{booking_id}/cancel", get(guest::cancel_form).post(guest::cancel))
        .route("/appointment/booking/{booking_id}/pay", get(guest::pay))

        // Payment callback
        .route("/api/v1/payments/{booking_id}/complete", post(payment::payment_complete))

        // Companies
        .route("/api/v1/companies", post(company::create_company))
        .route("/api/v1/{company_id}", get(company::get_company))

        // Appointment types
        .route("/api/v1/{company_id}/types", post(appointment_type::create_type).get(appointment_type::list_types))
        .route("/api/v1/{company_id}/types/{type_id}", get(appointment_type::get_type).put(appointment_type::update_type).delete(appointment_type::delete_type))

        // Availability rules
        .route("/api/v1/{company_id}/types/{type_id}/rules", post(availability::create_rule).get(availability::list_rules))
        .route("/api/v1/{company_id}/rules/{rule_id}", delete(availability::delete_rule))

        // Resources & staff
        .route("/api/v1/{company_id}/resources", post(resource::create_resource).get(resource::list_resources))
        .route("/api/v1/{company_id}/resources/{resource_id}", put(resource::update_resource))
        .route("/api/v1/{company_id}/types/{type_id}/resources/{resource_id}", post(resource::link_resource))
        .route("/api/v1/{company_id}/staff", post(staff::create_staff).get(staff::list_staff))
        .route("/api/v1/{company_id}/types/{type_id}/staff/{staff_id}", post(staff::link_staff))

        // Questions
        .route("/api/v1/{company_id}/types/{type_id}/questions", post(question::create_question).get(question::list_questions))
        .route("/api/v1/{company_id}/questions/{question_id}", delete(question::delete_question))

        // Slots
        .route("/api/v1/{company_id}/types/{type_id}/slots/generate", post(slot::generate_slots))
        .route("/api/v1/{company_id}/types/{type_id}/slots/available", get(slot::available_slots))
        .route("/api/v1/{company_id}/slots/{slot_id}/capacity", put(slot::set_slot_capacity))
        .route("/api/v1/{company_id}/slots/{slot_id}/close", post(slot::close_slot))

        // Bookings
        .route("/api/v1/{company_id}/bookings", get(booking_admin::list_bookings))
        .route("/api/v1/{company_id}/types/{type_id}/bookings", get(booking_admin::list_type_bookings))
        .route("/api/v1/{company_id}/bookings/{booking_id}", get(booking_admin::get_booking))
        .route("/api/v1/{company_id}/bookings/{booking_id}/confirm", post(booking_admin::confirm_booking))
        .route("/api/v1/{company_id}/bookings/{booking_id}/done", post(booking_admin::complete_booking))
        .route("/api/v1/{company_id}/bookings/{booking_id}/cancel", post(booking_admin::cancel_booking))
        .route("/api/v1/{company_id}/bookings/{booking_id}/reopen", post(booking_admin::reopen_booking))

        // Payment providers
        .route("/api/v1/{company_id}/payment-providers", post(payment::create_provider).get(payment::list_providers))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        company_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
