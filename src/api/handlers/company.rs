use crate::api::dtos::requests::CreateCompanyRequest;
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::company::Company;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let timezone = payload.timezone.unwrap_or_else(|| "UTC".to_string());
    let company = Company::new(payload.name, timezone);
    let created = state.company_repo.create(&company).await?;
    info!("Created company: {}", created.id);
    Ok(Json(created))
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .company_repo
        .find_by_id(&company_id)
        .await?
        .ok_or(AppError::NotFound("Company not found".into()))?;
    Ok(Json(company))
}
