use crate::domain::models::question::{QuestionOption, QuestionType};
use crate::error::AppError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FMT: &str = "%Y-%m-%d";

/// Typed answer payload, one variant per family of question kinds.
/// Select/radio carry exactly one option id; checkbox carries a set.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Datetime(NaiveDateTime),
    Options(Vec<String>),
}

impl AnswerValue {
    /// Build a typed value from the raw form payload, dispatching on the
    /// question type. Empty numbers default to 0.
    pub fn from_raw(question_type: QuestionType, raw: &Value) -> Result<Self, AppError> {
        match question_type {
            QuestionType::Text
            | QuestionType::Textarea
            | QuestionType::Email
            | QuestionType::Phone => Ok(AnswerValue::Text(
                raw.as_str().unwrap_or_default().to_string(),
            )),
            QuestionType::Number => {
                if let Some(n) = raw.as_f64() {
                    return Ok(AnswerValue::Number(n));
                }
                let s = raw.as_str().unwrap_or_default().trim();
                if s.is_empty() {
                    return Ok(AnswerValue::Number(0.0));
                }
                s.parse::<f64>()
                    .map(AnswerValue::Number)
                    .map_err(|_| AppError::Validation("Invalid number answer".into()))
            }
            QuestionType::Date => {
                let s = raw.as_str().unwrap_or_default();
                NaiveDate::parse_from_str(s, DATE_FMT)
                    .map(AnswerValue::Date)
                    .map_err(|_| AppError::Validation("Invalid date answer".into()))
            }
            QuestionType::Datetime => {
                let s = raw.as_str().unwrap_or_default();
                NaiveDateTime::parse_from_str(s, DATETIME_FMT)
                    .map(AnswerValue::Datetime)
                    .map_err(|_| AppError::Validation("Invalid datetime answer".into()))
            }
            QuestionType::Select | QuestionType::Radio => {
                let id = raw
                    .as_str()
                    .filter(|s| !s.is_empty())
                    .ok_or(AppError::Validation("An option must be selected".into()))?;
                Ok(AnswerValue::Options(vec![id.to_string()]))
            }
            QuestionType::Checkbox => {
                let ids = raw
                    .as_array()
                    .ok_or(AppError::Validation("Checkbox answer must be a list".into()))?
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect();
                Ok(AnswerValue::Options(ids))
            }
        }
    }

    /// Reverse of `from_raw`: the wire representation of the stored value.
    pub fn to_raw(&self) -> Value {
        match self {
            AnswerValue::Text(s) => Value::String(s.clone()),
            AnswerValue::Number(n) => serde_json::json!(n),
            AnswerValue::Date(d) => Value::String(d.format(DATE_FMT).to_string()),
            AnswerValue::Datetime(dt) => Value::String(dt.format(DATETIME_FMT).to_string()),
            AnswerValue::Options(ids) => {
                Value::Array(ids.iter().cloned().map(Value::String).collect())
            }
        }
    }

    /// Human-readable rendering; choice values resolve to their option labels.
    pub fn display_value(&self, options: &[QuestionOption]) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Date(d) => d.to_string(),
            AnswerValue::Datetime(dt) => dt.format(DATETIME_FMT).to_string(),
            AnswerValue::Options(ids) => {
                let labels: Vec<&str> = ids
                    .iter()
                    .filter_map(|id| options.iter().find(|o| &o.id == id))
                    .map(|o| o.label.as_str())
                    .collect();
                labels.join(", ")
            }
        }
    }
}

/// Answer attached to a booking; cascades away with the booking or question.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Answer {
    pub id: String,
    pub booking_id: String,
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(booking_id: String, question_id: String, value: AnswerValue) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            question_id,
            value,
        }
    }
}
