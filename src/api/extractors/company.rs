use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Path-scoped company id, validated against the companies table.
pub struct CompanyScope(pub String);

impl FromRequestParts<Arc<AppState>> for CompanyScope {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let company_id = params.get("company_id").ok_or(StatusCode::BAD_REQUEST)?;

        match state.company_repo.find_by_id(company_id).await {
            Ok(Some(_)) => Ok(CompanyScope(company_id.clone())),
            Ok(None) => Err(StatusCode::NOT_FOUND),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
