use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tera::Tera;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::lifecycle::BookingService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    sqlite_answer_repo::SqliteAnswerRepo, sqlite_availability_repo::SqliteAvailabilityRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_calendar_repo::SqliteCalendarRepo,
    sqlite_company_repo::SqliteCompanyRepo, sqlite_contact_repo::SqliteContactRepo,
    sqlite_payment_repo::SqlitePaymentRepo, sqlite_question_repo::SqliteQuestionRepo,
    sqlite_resource_repo::SqliteResourceRepo, sqlite_slot_repo::SqliteSlotRepo,
    sqlite_staff_repo::SqliteStaffRepo, sqlite_type_repo::SqliteTypeRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let mut tera = Tera::default();
    tera.add_raw_template("confirmation.html", include_str!("../templates/confirmation.html"))
        .expect("Failed to load confirmation template");
    tera.add_raw_template("cancellation.html", include_str!("../templates/cancellation.html"))
        .expect("Failed to load cancellation template");
    let templates = Arc::new(tera);

    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

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

    AppState {
        config: config.clone(),
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
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
