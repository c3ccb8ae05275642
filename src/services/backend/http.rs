use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ReservationBackend, ReservationFilter};
use crate::errors::AppError;
use crate::models::{
    DateRange, Feedback, NewFeedback, NewReservation, ReservationStats, Session, Venue,
};
use crate::services::feedback::Page;

pub struct HttpBackend {
    api_base_url: String,
    stats_base_url: String,
    feedback_base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CalendarEnvelope {
    #[serde(default)]
    calendar_data: BTreeMap<NaiveDate, Vec<Value>>,
}

impl HttpBackend {
    pub fn new(
        api_base_url: impl Into<String>,
        stats_base_url: impl Into<String>,
        feedback_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            stats_base_url: stats_base_url.into().trim_end_matches('/').to_string(),
            feedback_base_url: feedback_base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn api(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T, AppError> {
        let resp = self.send(req, what).await?;
        resp.json().await.map_err(|e| {
            tracing::error!(error = %e, what, "failed to decode upstream response");
            AppError::Fetch(format!("{what}: invalid response body: {e}"))
        })
    }

    async fn send(&self, req: RequestBuilder, what: &str) -> Result<reqwest::Response, AppError> {
        let resp = req.send().await.map_err(|e| {
            tracing::error!(error = %e, what, "upstream request failed");
            AppError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(%status, what, body = %body, "upstream returned an error");
            return Err(AppError::Fetch(format!("{what} returned {status}: {body}")));
        }
        Ok(resp)
    }
}

#[async_trait]
impl ReservationBackend for HttpBackend {
    async fn list_venues(&self, session: &Session) -> Result<Vec<Venue>, AppError> {
        let req = self.client.get(self.api("/venues")).bearer_auth(&session.token);
        self.fetch(req, "list venues").await
    }

    async fn list_reservations(
        &self,
        session: &Session,
        filter: &ReservationFilter,
    ) -> Result<Vec<Value>, AppError> {
        let mut req = self
            .client
            .get(self.api("/user-reservations"))
            .bearer_auth(&session.token);
        if let Some(venue_id) = filter.venue_id {
            req = req.query(&[("venue_id", venue_id)]);
        }
        self.fetch(req, "list reservations").await
    }

    async fn venue_calendar(
        &self,
        session: &Session,
        venue_id: i64,
        range: DateRange,
    ) -> Result<BTreeMap<NaiveDate, Vec<Value>>, AppError> {
        let req = self
            .client
            .get(self.api(&format!("/venues/{venue_id}/calendar")))
            .bearer_auth(&session.token)
            .query(&[
                ("start_date", range.start.format("%Y-%m-%d").to_string()),
                ("end_date", range.end.format("%Y-%m-%d").to_string()),
            ]);
        let envelope: CalendarEnvelope = self.fetch(req, "venue calendar").await?;
        Ok(envelope.calendar_data)
    }

    async fn create_reservation(
        &self,
        session: &Session,
        venue_id: i64,
        reservation: &NewReservation,
    ) -> Result<Value, AppError> {
        let user_id = session.user_id.ok_or(AppError::Unauthorized)?;
        let body = json!({
            "date": reservation.date.format("%Y-%m-%d").to_string(),
            "start_time": reservation.start_time,
            "end_time": reservation.end_time,
            "user_id": user_id,
            "venue_id": venue_id,
        });
        let req = self
            .client
            .post(self.api("/reservations"))
            .bearer_auth(&session.token)
            .json(&body);
        self.fetch(req, "create reservation").await
    }

    async fn cancel_reservation(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let req = self
            .client
            .delete(self.api(&format!("/reservations/{id}")))
            .bearer_auth(&session.token);
        self.send(req, "cancel reservation").await.map(|_| ())
    }

    async fn confirm_reservation(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let req = self
            .client
            .post(self.api(&format!("/reservations/{id}/confirm")))
            .bearer_auth(&session.token);
        self.send(req, "confirm reservation").await.map(|_| ())
    }

    async fn check_in_reservation(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let req = self
            .client
            .post(self.api(&format!("/reservations/{id}/check-in")))
            .bearer_auth(&session.token);
        self.send(req, "check in reservation").await.map(|_| ())
    }

    async fn recent_activities(&self, session: &Session, limit: u32) -> Result<Vec<Value>, AppError> {
        let req = self
            .client
            .get(self.api("/users/recent-activities"))
            .bearer_auth(&session.token)
            .query(&[("limit", limit)]);
        self.fetch(req, "recent activities").await
    }

    async fn reservation_stats(&self, session: &Session) -> Result<ReservationStats, AppError> {
        let req = self
            .client
            .get(format!("{}/user-reservations", self.stats_base_url))
            .bearer_auth(&session.token);
        self.fetch(req, "reservation statistics").await
    }

    async fn create_feedback(
        &self,
        session: &Session,
        feedback: &NewFeedback,
    ) -> Result<Feedback, AppError> {
        let user_id = session.user_id.ok_or(AppError::Unauthorized)?;
        let body = json!({
            "venue_id": feedback.venue_id,
            "title": feedback.title,
            "content": feedback.content,
            "rating": feedback.rating,
            "user_id": user_id,
        });
        let req = self
            .client
            .post(&self.feedback_base_url)
            .bearer_auth(&session.token)
            .json(&body);
        self.fetch(req, "create feedback").await
    }

    async fn list_my_feedback(&self, session: &Session, page: Page) -> Result<Vec<Feedback>, AppError> {
        let req = self
            .client
            .get(format!("{}/my", self.feedback_base_url))
            .bearer_auth(&session.token)
            .query(&[("page", page.page), ("limit", page.limit)]);
        self.fetch(req, "list my feedback").await
    }
}
