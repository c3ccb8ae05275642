use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::{parse_date, session_from_headers};
use crate::errors::AppError;
use crate::models::Venue;
use crate::services::listing::{ReservationRow, StatusFilter};
use crate::services::reservations::ReservationsView;
use crate::state::AppState;

// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Venue>>, AppError> {
    let session = session_from_headers(&headers)?;
    let venues = state.backend.list_venues(&session).await?;
    Ok(Json(venues))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationsQuery {
    pub venue_id: Option<i64>,
    pub status: Option<String>,
    pub date: Option<String>,
}

// GET /api/reservations
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<Vec<ReservationRow>>, AppError> {
    let mut view = open_view(&state, &headers, &query)?;
    view.load().await?;
    Ok(Json(view.rows(now())?))
}

// POST /api/reservations/:id/cancel
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<Vec<ReservationRow>>, AppError> {
    let mut view = open_view(&state, &headers, &query)?;
    view.load().await?;
    view.cancel(id, now().date()).await?;
    Ok(Json(view.rows(now())?))
}

// POST /api/reservations/:id/confirm
pub async fn confirm_reservation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<Vec<ReservationRow>>, AppError> {
    let mut view = open_view(&state, &headers, &query)?;
    view.load().await?;
    view.confirm(id).await?;
    Ok(Json(view.rows(now())?))
}

// POST /api/reservations/:id/check-in
pub async fn check_in_reservation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<Vec<ReservationRow>>, AppError> {
    let mut view = open_view(&state, &headers, &query)?;
    view.load().await?;
    view.check_in(id).await?;
    Ok(Json(view.rows(now())?))
}

fn open_view(
    state: &AppState,
    headers: &HeaderMap,
    query: &ReservationsQuery,
) -> Result<ReservationsView, AppError> {
    let session = session_from_headers(headers)?;
    let date = query.date.as_deref().map(parse_date).transpose()?;
    let status = StatusFilter::parse(query.status.as_deref().unwrap_or("all"));

    let mut view = ReservationsView::new(Arc::clone(&state.backend), session);
    view.set_venue(query.venue_id);
    view.set_filters(status, date);
    Ok(view)
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
