use crate::api::dtos::requests::CreateAvailabilityRuleRequest;
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::availability::AvailabilityRule;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn create_rule(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
    Json(payload): Json<CreateAvailabilityRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let rule = AvailabilityRule::new(
        type_id,
        payload.weekday,
        payload.hour_from,
        payload.hour_to,
        payload.resource_id,
        payload.staff_user_id,
    );
    rule.validate()?;

    let created = state.availability_repo.create(&rule).await?;
    Ok(Json(created))
}

pub async fn list_rules(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let rules = state.availability_repo.list_by_type(&type_id).await?;
    Ok(Json(rules))
}

pub async fn delete_rule(
    State(state): State<Arc<AppState>>,
    CompanyScope(_company_id): CompanyScope,
    Path((_, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.availability_repo.delete(&rule_id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
