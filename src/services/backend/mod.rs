pub mod http;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{
    DateRange, Feedback, NewFeedback, NewReservation, ReservationStats, Session, Venue,
};
use crate::services::feedback::Page;

/// Server-side narrowing of the reservation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub venue_id: Option<i64>,
}

/// The venue-reservation REST API. Reservation, slot and activity records
/// come back raw; `services::normalize` turns them into display models.
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    async fn list_venues(&self, session: &Session) -> Result<Vec<Venue>, AppError>;

    async fn list_reservations(
        &self,
        session: &Session,
        filter: &ReservationFilter,
    ) -> Result<Vec<Value>, AppError>;

    /// Raw slots keyed by day.
    async fn venue_calendar(
        &self,
        session: &Session,
        venue_id: i64,
        range: DateRange,
    ) -> Result<BTreeMap<NaiveDate, Vec<Value>>, AppError>;

    async fn create_reservation(
        &self,
        session: &Session,
        venue_id: i64,
        reservation: &NewReservation,
    ) -> Result<Value, AppError>;

    async fn cancel_reservation(&self, session: &Session, id: i64) -> Result<(), AppError>;

    async fn confirm_reservation(&self, session: &Session, id: i64) -> Result<(), AppError>;

    async fn check_in_reservation(&self, session: &Session, id: i64) -> Result<(), AppError>;

    async fn recent_activities(&self, session: &Session, limit: u32) -> Result<Vec<Value>, AppError>;

    async fn reservation_stats(&self, session: &Session) -> Result<ReservationStats, AppError>;

    /// Submits feedback as the session's user.
    async fn create_feedback(
        &self,
        session: &Session,
        feedback: &NewFeedback,
    ) -> Result<Feedback, AppError>;

    async fn list_my_feedback(&self, session: &Session, page: Page) -> Result<Vec<Feedback>, AppError>;
}
