pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/venues", get(handlers::reservations::list_venues))
        .route(
            "/api/venues/:id/calendar",
            get(handlers::calendar::month_calendar),
        )
        .route(
            "/api/venues/:id/calendar/:date",
            get(handlers::calendar::day_slots),
        )
        .route(
            "/api/venues/:id/bookings",
            post(handlers::calendar::create_booking),
        )
        .route(
            "/api/reservations",
            get(handlers::reservations::list_reservations),
        )
        .route(
            "/api/reservations/:id/cancel",
            post(handlers::reservations::cancel_reservation),
        )
        .route(
            "/api/reservations/:id/confirm",
            post(handlers::reservations::confirm_reservation),
        )
        .route(
            "/api/reservations/:id/check-in",
            post(handlers::reservations::check_in_reservation),
        )
        .route("/api/activities", get(handlers::activity::recent_activities))
        .route(
            "/api/statistics/summary",
            get(handlers::activity::statistics_summary),
        )
        .route("/api/feedback", post(handlers::feedback::submit_feedback))
        .route("/api/feedback/mine", get(handlers::feedback::my_feedback))
        .with_state(state)
}
