use appointment_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::EmailService,
    domain::services::lifecycle::BookingService,
    error::AppError,
    infra::repositories::{
        sqlite_answer_repo::SqliteAnswerRepo, sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_booking_repo::SqliteBookingRepo, sqlite_calendar_repo::SqliteCalendarRepo,
        sqlite_company_repo::SqliteCompanyRepo, sqlite_contact_repo::SqliteContactRepo,
        sqlite_payment_repo::SqlitePaymentRepo, sqlite_question_repo::SqliteQuestionRepo,
        sqlite_resource_repo::SqliteResourceRepo, sqlite_slot_repo::SqliteSlotRepo,
        sqlite_staff_repo::SqliteStaffRepo, sqlite_type_repo::SqliteTypeRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub has_attachment: bool,
}

#[derive(Default)]
pub struct RecordingEmailService {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            has_attachment: attachment_name.is_some(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mails: Arc<RecordingEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("confirmation.html", "<html>Confirmed {{ reference }}</html>")
            .unwrap();
        tera.add_raw_template("cancellation.html", "<html>Cancelled {{ reference }}</html>")
            .unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            base_url: "http://localhost:3000".to_string(),
        };

        let mails = Arc::new(RecordingEmailService::default());
        let email_service: Arc<dyn EmailService> = mails.clone();

        let type_repo = Arc::new(SqliteTypeRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let slot_repo = Arc::new(SqliteSlotRepo::new(pool.clone()));
        let resource_repo = Arc::new(SqliteResourceRepo::new(pool.clone()));
        let calendar_repo = Arc::new(SqliteCalendarRepo::new(pool.clone()));

        let booking_service = Arc::new(BookingService::new(
            booking_repo.clone(),
            type_repo.clone(),
            slot_repo.clone(),
            resource_repo.clone(),
            calendar_repo.clone(),
            email_service.clone(),
            templates.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            company_repo: Arc::new(SqliteCompanyRepo::new(pool.clone())),
            type_repo,
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            resource_repo,
            staff_repo: Arc::new(SqliteStaffRepo::new(pool.clone())),
            slot_repo,
            booking_repo,
            question_repo: Arc::new(SqliteQuestionRepo::new(pool.clone())),
            answer_repo: Arc::new(SqliteAnswerRepo::new(pool.clone())),
            contact_repo: Arc::new(SqliteContactRepo::new(pool.clone())),
            calendar_repo,
            payment_provider_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            email_service,
            booking_service,
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mails,
        }
    }

    pub async fn post(&self, uri: &str, payload: serde_json::Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn put(&self, uri: &str, payload: serde_json::Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn create_company(app: &TestApp) -> String {
    let res = app
        .post(
            "/api/v1/companies",
            serde_json::json!({ "name": "Acme", "timezone": "UTC" }),
        )
        .await;
    let body = parse_body(res).await;
    body["id"].as_str().unwrap().to_string()
}

/// Create a published appointment type; `overrides` patches the default body.
#[allow(dead_code)]
pub async fn create_type(
    app: &TestApp,
    company_id: &str,
    overrides: serde_json::Value,
) -> String {
    let mut payload = serde_json::json!({
        "name": "Consultation",
        "category": "meeting",
        "location_type": "online",
        "is_published": true,
        "slot_duration": 1.0,
        "slot_interval": 1.0,
        "max_booking_days": 30,
        "min_booking_hours": 1.0,
        "cancel_before_hours": 0.0,
        "auto_confirm": true,
        "timezone": "UTC"
    });
    if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    let res = app
        .post(&format!("/api/v1/{}/types", company_id), payload)
        .await;
    let body = parse_body(res).await;
    body["id"].as_str().unwrap().to_string()
}

/// A date next week on the given weekday (0 = Monday), far enough out that
/// minimum-notice filters never interfere.
#[allow(dead_code)]
pub fn upcoming_date(weekday: u32) -> chrono::NaiveDate {
    use chrono::{Datelike, Duration, Utc};
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday().num_days_from_monday() != weekday {
        date += Duration::days(1);
    }
    date
}

#[allow(dead_code)]
pub fn datetime_str(date: chrono::NaiveDate, hour: u32, minute: u32) -> String {
    format!("{} {:02}:{:02}:00", date.format("%Y-%m-%d"), hour, minute)
}
