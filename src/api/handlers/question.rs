use crate::api::dtos::requests::CreateQuestionRequest;
use crate::api::dtos::responses::QuestionWithOptions;
use crate::api::extractors::company::CompanyScope;
use crate::domain::models::question::{Question, QuestionOption};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn create_question(
    State(state): State<Arc<AppState>>,
    CompanyScope(company_id): CompanyScope,
    Path((_, type_id)): Path<(String, String)>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .type_repo
        .find_by_id(&type_id)
        .await?
        .filter(|t| t.company_id == company_id)
        .ok_or(AppError::NotFound("Appointment type not found".into()))?;

    let option_labels = payload.options.unwrap_or_default();
    if payload.question_type.has_options() && option_labels.is_empty() {
        return Err(AppError::Validation(
            "Choice questions need at least one option".into(),
        ));
    }
    if !payload.question_type.has_options() && !option_labels.is_empty() {
        return Err(AppError::Validation(
            "Only select, radio and checkbox questions take options".into(),
        ));
    }

    let mut question = Question::new(
        type_id,
        payload.label,
        payload.question_type,
        payload.required.unwrap_or(false),
        payload.sequence.unwrap_or(10),
    );
    question.placeholder = payload.placeholder;
    question.help_text = payload.help_text;
    let question = state.question_repo.create(&question).await?;

    let mut options = Vec::new();
    for (i, label) in option_labels.into_iter().enumerate() {
        let option = QuestionOption::new(question.id.clone(), label, (i as i32 + 1) * 10);
        options.push(state.question_repo.create_option(&option).await?);
    }

    Ok(Json(QuestionWithOptions { question, options }))
}

pub async fn list_questions(
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

    let questions = state.question_repo.list_by_type(&type_id).await?;
    let mut out = Vec::with_capacity(questions.len());
    for question in questions {
        let options = state.question_repo.list_options(&question.id).await?;
        out.push(QuestionWithOptions { question, options });
    }
    Ok(Json(out))
}

pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    CompanyScope(_company_id): CompanyScope,
    Path((_, question_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.question_repo.delete(&question_id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
