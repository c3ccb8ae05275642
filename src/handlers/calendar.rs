use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{parse_date, session_from_headers};
use crate::errors::AppError;
use crate::models::{CalendarDay, Reservation, TimeSlot};
use crate::services::calendar::CalendarView;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    venue_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    days: Vec<CalendarDay>,
}

// GET /api/venues/:id/calendar
pub async fn month_calendar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(venue_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = today();
    let mut view = open_view(&state, &headers, venue_id)?;
    view.load_month(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month()),
    )
    .await?;

    let days = view.days(today)?;
    let range = view
        .range()
        .ok_or_else(|| AppError::Validation("no month selected".to_string()))?;
    Ok(Json(CalendarResponse {
        venue_id,
        start: range.start,
        end: range.end,
        days,
    }))
}

#[derive(Serialize)]
pub struct SlotResponse {
    #[serde(flatten)]
    slot: TimeSlot,
    bookable: bool,
}

// GET /api/venues/:id/calendar/:date
pub async fn day_slots(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((venue_id, date)): Path<(i64, String)>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let date = parse_date(&date)?;
    let mut view = open_view(&state, &headers, venue_id)?;
    view.load_month(date.year(), date.month()).await?;

    let slots = view
        .slots_for(date)
        .iter()
        .map(|slot| SlotResponse {
            bookable: slot.is_bookable(),
            slot: slot.clone(),
        })
        .collect();
    Ok(Json(slots))
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub slot_id: i64,
}

// POST /api/venues/:id/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(venue_id): Path<i64>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let mut view = open_view(&state, &headers, venue_id)?;
    view.load_month(body.date.year(), body.date.month()).await?;
    let reservation = view.book(body.date, body.slot_id).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

fn open_view(state: &AppState, headers: &HeaderMap, venue_id: i64) -> Result<CalendarView, AppError> {
    let session = session_from_headers(headers)?;
    Ok(CalendarView::new(
        Arc::clone(&state.backend),
        session,
        venue_id,
        state.config.booking_window_months,
    ))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
