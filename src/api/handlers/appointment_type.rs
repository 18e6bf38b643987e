use crate::api::dtos::requests::{CreateAppointmentTypeRequest, UpdateAppointmentTypeRequest};
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::appointment_type::AppointmentType;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn create_type(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Json(payload): Json<CreateAppointmentTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = AppointmentType {
        id: Uuid::new_v4().to_string(),
        company_id,
        name: payload.name,
        category: payload.category,
        description: payload.description,
        location_type: payload.location_type,
        location_address: payload.location_address,
        video_link: payload.video_link,
        sequence: payload.sequence.unwrap_or(10),
        active: true,
        is_published: payload.is_published.unwrap_or(false),
        slot_duration: payload.slot_duration,
        slot_interval: payload.slot_interval,
        max_booking_days: payload.max_booking_days.unwrap_or(30),
        min_booking_hours: payload.min_booking_hours.unwrap_or(1.0),
        cancel_before_hours: payload.cancel_before_hours.unwrap_or(0.0),
        manage_capacity: payload.manage_capacity.unwrap_or(false),
        auto_confirm: payload.auto_confirm.unwrap_or(true),
        auto_confirm_capacity_percent: payload.auto_confirm_capacity_percent.unwrap_or(100),
        require_payment: payload.require_payment.unwrap_or(false),
        payment_amount: payload.payment_amount.unwrap_or(0.0),
        payment_per_person: payload.payment_per_person.unwrap_or(false),
        currency: payload.currency.unwrap_or_else(|| "USD".to_string()),
        timezone: payload.timezone.unwrap_or_else(|| "UTC".to_string()),
        created_at: Utc::now(),
    };
    record.validate()?;

    let created = state.type_repo.create(&record).await?;
    info!("Created appointment type: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_types(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let types = state.type_repo.list(&company_id).await?;
    Ok(Json(types))
}

pub async fn get_type(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    Ok(Json(record))
}

pub async fn update_type(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
    Json(payload): Json<UpdateAppointmentTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut record = state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    if let Some(name) = payload.name { record.name = name; }
    if let Some(category) = payload.category { record.category = category; }
    if let Some(description) = payload.description { record.description = Some(description); }
    if let Some(location_type) = payload.location_type { record.location_type = location_type; }
    if let Some(addr) = payload.location_address { record.location_address = Some(addr); }
    if let Some(link) = payload.video_link { record.video_link = Some(link); }
    if let Some(sequence) = payload.sequence { record.sequence = sequence; }
    if let Some(active) = payload.active { record.active = active; }
    if let Some(published) = payload.is_published { record.is_published = published; }
    if let Some(duration) = payload.slot_duration { record.slot_duration = duration; }
    if let Some(interval) = payload.slot_interval { record.slot_interval = Some(interval); }
    if let Some(days) = payload.max_booking_days { record.max_booking_days = days; }
    if let Some(hours) = payload.min_booking_hours { record.min_booking_hours = hours; }
    if let Some(hours) = payload.cancel_before_hours { record.cancel_before_hours = hours; }
    if let Some(managed) = payload.manage_capacity { record.manage_capacity = managed; }
    if let Some(auto) = payload.auto_confirm { record.auto_confirm = auto; }
    if let Some(pct) = payload.auto_confirm_capacity_percent { record.auto_confirm_capacity_percent = pct; }
    if let Some(required) = payload.require_payment { record.require_payment = required; }
    if let Some(amount) = payload.payment_amount { record.payment_amount = amount; }
    if let Some(per_person) = payload.payment_per_person { record.payment_per_person = per_person; }
    if let Some(currency) = payload.currency { record.currency = currency; }
    if let Some(timezone) = payload.timezone { record.timezone = timezone; }

    record.validate()?;
    let updated = state.type_repo.update(&record).await?;
    Ok(Json(updated))
}

/// Hard delete is refused while bookings reference the type; archiving
/// (active = false) is the supported way to retire it.
pub async fn delete_type(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.count_by_type(&type_id).await?;
    if bookings > 0 {
        return Err(AppError::Conflict(
            "Cannot delete an appointment type with existing bookings; archive it instead".into(),
        ));
    }
    state.type_repo.delete(&company_id, &type_id).await?;
    info!("Deleted appointment type: {}", type_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
