use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIME_FMT: &str = "%H:%M";

pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .map_err(|_| AppError::Validation("Invalid datetime format (YYYY-MM-DD HH:MM:SS)".into()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

pub fn fmt_datetime(dt: DateTime<Utc>) -> String {
    dt.format(DATETIME_FMT).to_string()
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn fmt_time(dt: DateTime<Utc>) -> String {
    dt.format(TIME_FMT).to_string()
}
