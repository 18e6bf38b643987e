use crate::api::dtos::requests::{CreatePaymentProviderRequest, PaymentCompleteRequest};
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::payment::PaymentProvider;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn create_provider(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Json(payload): Json<CreatePaymentProviderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let provider = PaymentProvider::new(company_id, payload.name, payload.code);
    let created = state.payment_provider_repo.create(&provider).await?;
    Ok(Json(created))
}

pub async fn list_providers(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let providers = state.payment_provider_repo.list(&company_id).await?;
    Ok(Json(providers))
}

/// Provider-agnostic completion callback. Marks the booking paid and lets the
/// lifecycle service auto-confirm when the type is configured for it.
pub async fn payment_complete(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<PaymentCompleteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .booking_service
        .payment_completed(&booking_id, &payload.transaction_ref)
        .await?;
    info!("Payment completed for booking: {}", updated.reference);
    Ok(Json(updated))
}
