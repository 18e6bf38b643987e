use crate::api::dtos::requests::{AvailableSlotsQuery, GenerateSlotsRequest, SetSlotCapacityRequest};
use crate::api::dtos::responses::SlotsGeneratedResponse;
use crate::api::extractors::company::CompanyScope;
use crate::api::wire;
use crate::domain::models::slot::AppointmentSlot;
use crate::domain::services::slots;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::info;

/// Materialize slot rows over a date range. The sweep is deterministic, so
/// re-running over the same range recreates the same candidate sequence.
pub async fn generate_slots(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
    Json(payload): Json<GenerateSlotsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let appointment_type = state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let start_date = wire::parse_date(&payload.start_date)?;
    let end_date = wire::parse_date(&payload.end_date)?;
    if end_date < start_date {
        return Err(AppError::Validation("End date must not precede start date".into()));
    }

    let resource = match &payload.resource_id {
        Some(id) => state.resource_repo.find_by_id(id).await?,
        None => None,
    };
    let staff = match &payload.staff_user_id {
        Some(id) => state.staff_repo.find_by_id(id).await?,
        None => None,
    };
    let rules = state.availability_repo.list_by_type(&type_id).await?;

    let start = Utc.from_utc_datetime(&start_date.and_time(NaiveTime::MIN));
    let end = Utc.from_utc_datetime(
        &end_date.succ_opt().unwrap_or(end_date).and_time(NaiveTime::MIN),
    );

    let existing = state.slot_repo.list_by_type(&type_id).await?;
    let candidates = slots::generate(
        &appointment_type,
        start,
        end,
        resource.as_ref(),
        staff.as_ref(),
        &rules,
    );

    let mut created = 0;
    for candidate in candidates {
        let duplicate = existing.iter().any(|s| {
            s.start_datetime == candidate.start
                && s.resource_id == payload.resource_id
                && s.staff_user_id == payload.staff_user_id
        });
        if duplicate {
            continue;
        }
        let slot = AppointmentSlot::new(
            type_id.clone(),
            payload.resource_id.clone(),
            payload.staff_user_id.clone(),
            candidate.start,
            candidate.end,
            candidate.capacity,
        );
        slot.validate()?;
        state.slot_repo.create(&slot).await?;
        created += 1;
    }

    info!("Generated {} slots for type {}", created, type_id);
    Ok(Json(SlotsGeneratedResponse { created }))
}

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let start = wire::parse_datetime(&query.start)?;
    let end = wire::parse_datetime(&query.end)?;
    let slots = state
        .slot_repo
        .get_available(
            &type_id,
            start,
            end,
            query.resource_id.as_deref(),
            query.staff_user_id.as_deref(),
        )
        .await?;
    Ok(Json(slots))
}

pub async fn set_slot_capacity(
    State(state): State<Arc<AppState>>,
    CompanyScope(_company_id): CompanyScope,
    Path((_, slot_id)): Path<(String, String)>,
    Json(payload): Json<SetSlotCapacityRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.slot_repo.set_capacity(&slot_id, payload.capacity).await?;
    let slot = state
        .slot_repo
        .find_by_id(&slot_id)
        .await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;
    Ok(Json(slot))
}

pub async fn close_slot(
    State(state): State<Arc<AppState>>,
    CompanyScope(_company_id): CompanyScope,
    Path((_, slot_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.slot_repo.close(&slot_id).await?;
    let slot = state
        .slot_repo
        .find_by_id(&slot_id)
        .await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;
    Ok(Json(slot))
}
