use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid data: {0}")]
    Validation(String),

    #[error("slot {slot_id} on {date} has no remaining capacity")]
    CapacityExceeded { slot_id: i64, date: NaiveDate },

    #[error("upstream request failed: {0}")]
    Fetch(String),

    #[error("stale response (issued for load {issued}, current is {current})")]
    StaleResponse { issued: u64, current: u64 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl AppError {
    pub fn is_stale(&self) -> bool {
        matches!(self, AppError::StaleResponse { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CapacityExceeded { .. } => StatusCode::CONFLICT,
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::StaleResponse { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
