use crate::api::extractors::company::CompanyScope;
use crate::domain::models::booking::Booking;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

async fn load_booking(
    state: &AppState,
    company_id: &str,
    booking_id: &str,
) -> Result<Booking, AppError> {
    state
        .booking_repo
        .find_by_id(booking_id)
        .await?
        .filter(|b| b.company_id == company_id)
        .ok_or(AppError::NotFound("Booking not found".into()))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_company(&company_id).await?;
    Ok(Json(bookings))
}

pub async fn list_type_bookings(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_type(&company_id, &type_id).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &company_id, &booking_id).await?;
    Ok(Json(booking))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &company_id, &booking_id).await?;
    let updated = state.booking_service.confirm(&booking).await?;
    Ok(Json(updated))
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &company_id, &booking_id).await?;
    let updated = state.booking_service.done(&booking).await?;
    Ok(Json(updated))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &company_id, &booking_id).await?;
    let updated = state.booking_service.cancel(&booking).await?;
    Ok(Json(updated))
}

pub async fn reopen_booking(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &company_id, &booking_id).await?;
    let updated = state.booking_service.reopen(&booking).await?;
    Ok(Json(updated))
}
