use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::AppError;
use crate::models::{Reservation, Session};
use crate::services::backend::{ReservationBackend, ReservationFilter};
use crate::services::lifecycle::{self, Transition};
use crate::services::listing::{self, ReservationRow, StatusFilter};
use crate::services::normalize;
use crate::services::page::{PageScope, ScopeHandle};

/// The "my reservations" page: owns the loaded reservations for one visit.
///
/// Mutations wait for the backend to acknowledge and then reload; nothing
/// changes locally until that reload lands.
pub struct ReservationsView {
    backend: Arc<dyn ReservationBackend>,
    session: Session,
    scope: PageScope,
    filter: ReservationFilter,
    status_filter: StatusFilter,
    date_filter: Option<NaiveDate>,
    reservations: Vec<Reservation>,
}

impl ReservationsView {
    pub fn new(backend: Arc<dyn ReservationBackend>, session: Session) -> Self {
        Self {
            backend,
            session,
            scope: PageScope::new(),
            filter: ReservationFilter::default(),
            status_filter: StatusFilter::All,
            date_filter: None,
            reservations: Vec::new(),
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Changes the server-side venue filter; call `reload` afterwards.
    pub fn set_venue(&mut self, venue_id: Option<i64>) {
        self.filter.venue_id = venue_id;
    }

    /// Client-side filters applied by `rows`.
    pub fn set_filters(&mut self, status: StatusFilter, date: Option<NaiveDate>) {
        self.status_filter = status;
        self.date_filter = date;
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub async fn load(&mut self) -> Result<&[Reservation], AppError> {
        let ticket = self.scope.begin();
        let raw = self
            .backend
            .list_reservations(&self.session, &self.filter)
            .await?;
        let raw = self.scope.accept(ticket, raw)?;
        self.reservations = normalize::normalize_all(&raw)?;
        tracing::debug!(
            count = self.reservations.len(),
            venue_id = ?self.filter.venue_id,
            "loaded reservations"
        );
        Ok(&self.reservations)
    }

    pub async fn reload(&mut self) -> Result<&[Reservation], AppError> {
        self.load().await
    }

    pub fn rows(&self, now: NaiveDateTime) -> Result<Vec<ReservationRow>, AppError> {
        listing::process(&self.reservations, &self.status_filter, self.date_filter, now)
    }

    /// Past reservations are refused before any request goes out.
    pub async fn cancel(&mut self, id: i64, today: NaiveDate) -> Result<(), AppError> {
        lifecycle::ensure_not_past(self.find(id)?, today)?;
        self.transition(id, Transition::Cancel).await
    }

    pub async fn confirm(&mut self, id: i64) -> Result<(), AppError> {
        self.transition(id, Transition::Confirm).await
    }

    pub async fn check_in(&mut self, id: i64) -> Result<(), AppError> {
        self.transition(id, Transition::CheckIn).await
    }

    async fn transition(&mut self, id: i64, transition: Transition) -> Result<(), AppError> {
        lifecycle::check(self.find(id)?, transition)?;

        match transition {
            Transition::Cancel => self.backend.cancel_reservation(&self.session, id).await?,
            Transition::Confirm => self.backend.confirm_reservation(&self.session, id).await?,
            Transition::CheckIn => self.backend.check_in_reservation(&self.session, id).await?,
        }
        tracing::info!(reservation_id = id, action = transition.as_str(), "reservation updated");

        self.reload().await.map(|_| ())
    }

    fn find(&self, id: i64) -> Result<&Reservation, AppError> {
        self.reservations
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))
    }
}
