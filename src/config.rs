use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub stats_base_url: String,
    pub feedback_base_url: String,
    pub upstream_timeout: Duration,
    pub booking_window_months: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            stats_base_url: env::var("STATS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/stats".to_string()),
            feedback_base_url: env::var("FEEDBACK_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/feedback".to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            booking_window_months: env::var("BOOKING_WINDOW_MONTHS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }
}
