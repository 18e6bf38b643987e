use crate::api::dtos::requests::{BookFormQuery, DaySlotsRequest, GuestBookRequest, TokenQuery};
use crate::api::dtos::responses::{
    AnswerView, BookContextResponse, BookingCreatedResponse, BookingDetailResponse,
    CancelResultResponse, DaySlot, DaySlotsResponse, PayPageResponse, QuestionWithOptions,
    ScheduleResponse, TypeDetailResponse,
};
use crate::api::wire;
use crate::domain::models::answer::{Answer, AnswerValue};
use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::booking::{Booking, NewBookingParams, PaymentStatus};
use crate::domain::models::company::Contact;
use crate::domain::services::slots;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Unauthorized or unknown guest URLs all land on the listing page, leaking
/// nothing about what exists.
fn to_listing() -> Response {
    Redirect::to("/appointment").into_response()
}

fn token_allows(booking: &Booking, token: &Option<String>) -> bool {
    match token {
        Some(t) => booking.token_matches(t),
        None => true,
    }
}

/// 400 with the submitted values echoed back so the form can re-render.
fn form_error(message: &str, payload: &GuestBookRequest) -> Response {
    let form = json!({
        "guest_name": payload.guest_name,
        "guest_email": payload.guest_email,
        "guest_phone": payload.guest_phone,
        "guest_count": payload.guest_count,
        "start_datetime": payload.start_datetime,
        "notes": payload.notes,
        "answers": payload.answers,
    });
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message, "form": form }))).into_response()
}

async fn load_published_type(
    state: &AppState,
    type_id: &str,
) -> Result<Option<AppointmentType>, AppError> {
    Ok(state
        .type_repo
        .find_by_id(type_id)
        .await?
        .filter(|t| t.is_published && t.active))
}

async fn questions_with_options(
    state: &AppState,
    type_id: &str,
) -> Result<Vec<QuestionWithOptions>, AppError> {
    let questions = state.question_repo.list_by_type(type_id).await?;
    let mut out = Vec::with_capacity(questions.len());
    for question in questions {
        let options = state.question_repo.list_options(&question.id).await?;
        out.push(QuestionWithOptions { question, options });
    }
    Ok(out)
}

pub async fn list_published(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let types = state.type_repo.list_published().await?;
    Ok(Json(types))
}

pub async fn type_detail(
    State(state): State<Arc<AppState>>,
    Path(type_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(appointment_type) = load_published_type(&state, &type_id).await? else {
        return Ok(to_listing());
    };
    let questions = questions_with_options(&state, &type_id).await?;
    Ok(Json(TypeDetailResponse { appointment_type, questions }).into_response())
}

pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Path(type_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(appointment_type) = load_published_type(&state, &type_id).await? else {
        return Ok(to_listing());
    };
    let resources = state.resource_repo.list_by_type(&type_id).await?;
    let staff = state.staff_repo.list_by_type(&type_id).await?;
    let today = Utc::now().date_naive();
    let date_to = today + Duration::days(appointment_type.max_booking_days as i64);
    Ok(Json(ScheduleResponse {
        appointment_type,
        resources,
        staff,
        date_from: wire::fmt_date(today),
        date_to: wire::fmt_date(date_to),
    })
    .into_response())
}

/// Interactive day query: candidates from the availability rules, minus the
/// live confirmed/done booking counts at each start.
pub async fn day_slots(
    State(state): State<Arc<AppState>>,
    Path(type_id): Path<String>,
    Json(payload): Json<DaySlotsRequest>,
) -> Result<Response, AppError> {
    let Some(appointment_type) = load_published_type(&state, &type_id).await? else {
        return Ok(to_listing());
    };
    let date = wire::parse_date(&payload.date)?;

    let resource = match &payload.resource_id {
        Some(id) => state.resource_repo.find_by_id(id).await?,
        None => None,
    };
    let staff = match &payload.staff_id {
        Some(id) => state.staff_repo.find_by_id(id).await?,
        None => None,
    };
    let rules = state.availability_repo.list_by_type(&type_id).await?;
    let capacity = resource.as_ref().map(|r| r.capacity).unwrap_or(1);

    let windows = slots::day_windows(date, &rules, resource.as_ref(), staff.as_ref());
    let candidates = slots::day_candidates(&appointment_type, date, &windows, Utc::now());

    let mut out = Vec::new();
    for (start, end) in candidates {
        let taken = state
            .booking_repo
            .count_active_at(
                &type_id,
                start,
                payload.resource_id.as_deref(),
                payload.staff_id.as_deref(),
            )
            .await?;
        let available = capacity - taken as i32;
        if available > 0 {
            out.push(DaySlot {
                start: wire::fmt_datetime(start),
                end: wire::fmt_datetime(end),
                start_time: wire::fmt_time(start),
                end_time: wire::fmt_time(end),
                available,
            });
        }
    }

    Ok(Json(DaySlotsResponse {
        date: payload.date,
        slots: out,
    })
    .into_response())
}

pub async fn book_form(
    State(state): State<Arc<AppState>>,
    Path(type_id): Path<String>,
    Query(query): Query<BookFormQuery>,
) -> Result<Response, AppError> {
    let Some(appointment_type) = load_published_type(&state, &type_id).await? else {
        return Ok(to_listing());
    };
    let start = wire::parse_datetime(&query.start_datetime)?;
    let end = start + Duration::seconds((appointment_type.slot_duration * 3600.0).round() as i64);
    let questions = questions_with_options(&state, &type_id).await?;
    Ok(Json(BookContextResponse {
        appointment_type,
        questions,
        start_datetime: wire::fmt_datetime(start),
        end_datetime: wire::fmt_datetime(end),
    })
    .into_response())
}

fn raw_answer_missing(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}

pub async fn book(
    State(state): State<Arc<AppState>>,
    Path(type_id): Path<String>,
    Json(payload): Json<GuestBookRequest>,
) -> Result<Response, AppError> {
    let Some(appointment_type) = load_published_type(&state, &type_id).await? else {
        return Ok(to_listing());
    };

    let guest_name = payload.guest_name.clone().unwrap_or_default();
    let guest_email = payload.guest_email.clone().unwrap_or_default();
    if guest_name.trim().is_empty() {
        return Ok(form_error("Your name is required", &payload));
    }
    if guest_email.trim().is_empty() || !guest_email.contains('@') {
        return Ok(form_error("A valid email address is required", &payload));
    }
    let guest_count = payload.guest_count.unwrap_or(1);
    if guest_count < 1 {
        return Ok(form_error("Number of guests must be at least 1", &payload));
    }

    // Start/end and capacity come from the chosen slot when one is given,
    // otherwise from the submitted start and the on-demand rules.
    let (start, end, capacity, slot_id) = if let Some(slot_id) = &payload.slot_id {
        let slot = state
            .slot_repo
            .find_by_id(slot_id)
            .await?
            .filter(|s| s.appointment_type_id == type_id)
            .ok_or(AppError::NotFound("Slot not found".into()))?;
        if !slot.is_available(guest_count) {
            return Err(AppError::Conflict(
                "Selected time slot is no longer available".into(),
            ));
        }
        (slot.start_datetime, slot.end_datetime, slot.capacity, Some(slot.id))
    } else {
        let Some(raw_start) = &payload.start_datetime else {
            return Ok(form_error("A start time is required", &payload));
        };
        let start = match wire::parse_datetime(raw_start) {
            Ok(dt) => dt,
            Err(_) => return Ok(form_error("Invalid start time", &payload)),
        };
        let min_start = Utc::now()
            + Duration::seconds((appointment_type.min_booking_hours * 3600.0).round() as i64);
        if start < min_start {
            return Ok(form_error("This time can no longer be booked", &payload));
        }
        let end =
            start + Duration::seconds((appointment_type.slot_duration * 3600.0).round() as i64);
        let capacity = match &payload.resource_id {
            Some(id) => state
                .resource_repo
                .find_by_id(id)
                .await?
                .map(|r| r.capacity)
                .unwrap_or(1),
            None => 1,
        };
        (start, end, capacity, None)
    };

    // Answers are typed and validated before anything is written.
    let questions = state.question_repo.list_by_type(&type_id).await?;
    let raw_answers = payload.answers.clone().unwrap_or_default();
    let mut typed_answers = Vec::new();
    for question in &questions {
        let raw = raw_answers.get(&question.id);
        if raw_answer_missing(raw) {
            if question.required {
                return Ok(form_error(
                    &format!("\"{}\" is required", question.label),
                    &payload,
                ));
            }
            continue;
        }
        match AnswerValue::from_raw(question.question_type, raw.unwrap_or(&Value::Null)) {
            Ok(value) => typed_answers.push((question.id.clone(), value)),
            Err(e) => return Ok(form_error(&e.to_string(), &payload)),
        }
    }

    let contact = match state
        .contact_repo
        .find_by_email(&appointment_type.company_id, guest_email.trim())
        .await?
    {
        Some(existing) => existing,
        None => {
            let contact = Contact::new(
                appointment_type.company_id.clone(),
                guest_name.clone(),
                guest_email.trim().to_string(),
                payload.guest_phone.clone(),
            );
            state.contact_repo.create(&contact).await?
        }
    };

    let mut booking = Booking::new(NewBookingParams {
        company_id: appointment_type.company_id.clone(),
        appointment_type_id: type_id.clone(),
        slot_id,
        guest_name,
        guest_email: guest_email.trim().to_string(),
        guest_phone: payload.guest_phone.clone(),
        guest_count,
        resource_id: payload.resource_id.clone(),
        staff_user_id: payload.staff_id.clone(),
        start,
        end,
        notes: payload.notes.clone(),
    });
    booking.contact_id = Some(contact.id);
    if appointment_type.require_payment {
        booking.payment_status = PaymentStatus::Pending;
        let per = if appointment_type.payment_per_person {
            guest_count as f64
        } else {
            1.0
        };
        booking.payment_amount = appointment_type.payment_amount * per;
    }
    booking.validate()?;

    let mut created = state.booking_repo.create_checked(&booking, capacity).await?;
    info!("Booking created: {} for type {}", created.reference, type_id);

    for (question_id, value) in typed_answers {
        let answer = Answer::new(created.id.clone(), question_id, value);
        state.answer_repo.create(&answer).await?;
    }

    if let Some(slot_id) = &created.slot_id {
        state.slot_repo.recompute(slot_id).await?;
    }

    // Unpaid auto-confirming types confirm immediately; paid ones wait for
    // the payment callback.
    if appointment_type.auto_confirm && !appointment_type.require_payment {
        created = state.booking_service.confirm(&created).await?;
    }

    let redirect = if appointment_type.require_payment {
        format!("/appointment/booking/{}/pay?token={}", created.id, created.access_token)
    } else {
        format!("/appointment/booking/{}/confirm?token={}", created.id, created.access_token)
    };

    Ok(Json(BookingCreatedResponse { booking: created, redirect }).into_response())
}

async fn load_authorized(
    state: &AppState,
    booking_id: &str,
    token: &Option<String>,
) -> Result<Option<Booking>, AppError> {
    let Some(booking) = state.booking_repo.find_by_id(booking_id).await? else {
        return Ok(None);
    };
    if !token_allows(&booking, token) {
        return Ok(None);
    }
    Ok(Some(booking))
}

pub async fn booking_confirmed(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = load_authorized(&state, &booking_id, &query.token).await? else {
        return Ok(to_listing());
    };
    let appointment_type = state
        .type_repo
        .find_by_id(&booking.appointment_type_id)
        .await?
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    Ok(Json(json!({ "booking": booking, "appointment_type": appointment_type })).into_response())
}

pub async fn booking_detail(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = load_authorized(&state, &booking_id, &query.token).await? else {
        return Ok(to_listing());
    };
    let appointment_type = state
        .type_repo
        .find_by_id(&booking.appointment_type_id)
        .await?
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let mut answers = Vec::new();
    for answer in state.answer_repo.list_by_booking(&booking.id).await? {
        let Some(question) = state.question_repo.find_by_id(&answer.question_id).await? else {
            continue;
        };
        let options = state.question_repo.list_options(&question.id).await?;
        answers.push(AnswerView {
            question_id: question.id,
            label: question.label,
            value: answer.value.display_value(&options),
        });
    }

    Ok(Json(BookingDetailResponse { booking, appointment_type, answers }).into_response())
}

pub async fn cancel_form(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = load_authorized(&state, &booking_id, &query.token).await? else {
        return Ok(to_listing());
    };
    let appointment_type = state
        .type_repo
        .find_by_id(&booking.appointment_type_id)
        .await?
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    Ok(Json(json!({
        "booking": booking,
        "cancel_before_hours": appointment_type.cancel_before_hours,
    }))
    .into_response())
}

/// Guest cancellation. A refused transition (deadline passed, booking done)
/// renders inline with the booking instead of failing the request.
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = load_authorized(&state, &booking_id, &query.token).await? else {
        return Ok(to_listing());
    };
    let response = match state.booking_service.cancel(&booking).await {
        Ok(updated) => CancelResultResponse { booking: updated, error: None },
        Err(AppError::Conflict(msg)) => CancelResultResponse { booking, error: Some(msg) },
        Err(e) => return Err(e),
    };
    Ok(Json(response).into_response())
}

pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = load_authorized(&state, &booking_id, &query.token).await? else {
        return Ok(to_listing());
    };
    if booking.payment_status == PaymentStatus::Paid {
        let target = match &query.token {
            Some(t) => format!("/appointment/booking/{}/confirm?token={}", booking.id, t),
            None => format!("/appointment/booking/{}/confirm", booking.id),
        };
        return Ok(Redirect::to(&target).into_response());
    }
    let appointment_type = state
        .type_repo
        .find_by_id(&booking.appointment_type_id)
        .await?
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    let providers = state
        .payment_provider_repo
        .list_enabled(&booking.company_id)
        .await?;
    Ok(Json(PayPageResponse {
        amount: booking.payment_amount,
        currency: appointment_type.currency.clone(),
        booking,
        providers,
    })
    .into_response())
}
