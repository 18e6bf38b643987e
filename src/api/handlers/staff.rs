use crate::api::dtos::requests::CreateStaffRequest;
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::resource::StaffUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(resource_id) = &payload.resource_id {
        state
            .resource_repo
            .find_by_id(resource_id)
            .await?
            .filter(|r| r.company_id == company_id)
            .ok_or(AppError::NotFound("Resource not found".into()))?;
    }

    let staff = StaffUser::new(company_id, payload.name, payload.email, payload.resource_id);
    let created = state.staff_repo.create(&staff).await?;
    info!("Created staff user: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.list(&company_id).await?;
    Ok(Json(staff))
}

pub async fn link_staff(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id, staff_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    state
        .staff_repo
        .find_by_id(&staff_id)
        .await?
        .filter(|s| s.company_id == company_id)
        .ok_or(AppError::NotFound("Staff user not found".into()))?;

    state.staff_repo.link_type(&staff_id, &type_id).await?;
    Ok(Json(serde_json::json!({ "status": "linked" })))
}
