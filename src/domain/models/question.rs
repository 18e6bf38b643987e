use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    Datetime,
    Number,
    Email,
    Phone,
}

impl QuestionType {
    /// Option lists only make sense for the three choice kinds.
    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::Select | QuestionType::Radio | QuestionType::Checkbox)
    }
}

/// Custom form field attached to an appointment type.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Question {
    pub id: String,
    pub appointment_type_id: String,
    pub label: String,
    pub question_type: QuestionType,
    pub required: bool,
    pub sequence: i32,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}

impl Question {
    pub fn new(
        appointment_type_id: String,
        label: String,
        question_type: QuestionType,
        required: bool,
        sequence: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_type_id,
            label,
            question_type,
            required,
            sequence,
            placeholder: None,
            help_text: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct QuestionOption {
    pub id: String,
    pub question_id: String,
    pub label: String,
    pub sequence: i32,
}

impl QuestionOption {
    pub fn new(question_id: String, label: String, sequence: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question_id,
            label,
            sequence,
        }
    }
}
