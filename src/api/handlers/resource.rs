use crate::api::dtos::requests::{CreateResourceRequest, UpdateResourceRequest};
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::resource::Resource;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Json(payload): Json<CreateResourceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::new(company_id, payload.name, payload.capacity);
    resource.validate()?;
    let created = state.resource_repo.create(&resource).await?;
    info!("Created resource: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let resources = state.resource_repo.list(&company_id).await?;
    Ok(Json(resources))
}

pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, resource_id)): Path<(String, String)>,
    Json(payload): Json<UpdateResourceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut resource = state
        .resource_repo
        .find_by_id(&resource_id)
        .await?
        .filter(|r| r.company_id == company_id)
        .ok_or(AppError::NotFound("Resource not found".into()))?;

    if let Some(name) = payload.name { resource.name = name; }
    if let Some(capacity) = payload.capacity { resource.capacity = capacity; }
    if let Some(active) = payload.active { resource.active = active; }

    resource.validate()?;
    let updated = state.resource_repo.update(&resource).await?;
    Ok(Json(updated))
}

pub async fn link_resource(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id, resource_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;
    state
        .resource_repo
        .find_by_id(&resource_id)
        .await?
        .filter(|r| r.company_id == company_id)
        .ok_or(AppError::NotFound("Resource not found".into()))?;

    state.resource_repo.link_type(&resource_id, &type_id).await?;
    Ok(Json(serde_json::json!({ "status": "linked" })))
}
