pub mod activity;
pub mod calendar;
pub mod feedback;
pub mod health;
pub mod reservations;

use axum::http::HeaderMap;
use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::Session;

/// Builds the caller's session from `Authorization: Bearer` and `X-User-Id`.
pub(crate) fn session_from_headers(headers: &HeaderMap) -> Result<Session, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("").trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok());

    Ok(Session::new(token, user_id))
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {s:?} (expected YYYY-MM-DD)")))
}
