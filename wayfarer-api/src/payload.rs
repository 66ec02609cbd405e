use axum::extract::FromRequest;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// `Json` with body rejections reported in the service's `{"message": ...}` shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Reject the request when any required string field is empty.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AppError::ValidationError(format!(
            "Missing required field: {}",
            name
        ))),
        None => Ok(()),
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
/// Sub-microsecond digits are dropped, matching what PostgreSQL stores.
pub fn travel_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_travel_date(&raw).map_err(serde::de::Error::custom)
}

fn parse_travel_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(6));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid travel date: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn travel_date_formats() {
        assert_eq!(
            parse_travel_date("2027-06-01").unwrap(),
            Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_travel_date("2027-06-01T09:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2027, 6, 1, 7, 30, 0).unwrap()
        );
        assert_eq!(
            parse_travel_date("2027-06-01T09:30:00.123456789Z")
                .unwrap()
                .timestamp_subsec_nanos(),
            123_456_000
        );
        assert!(parse_travel_date("next tuesday").is_err());
    }

    #[test]
    fn empty_required_field_is_named() {
        let err = require_fields(&[("name", "Ann"), ("message", "  ")]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: message");
        assert!(require_fields(&[("email", "not-an-email")]).is_ok());
    }
}
