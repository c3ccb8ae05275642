use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{CalendarDay, DateRange, NewReservation, Reservation, Session, TimeSlot};
use crate::services::availability;
use crate::services::backend::ReservationBackend;
use crate::services::normalize;
use crate::services::page::{PageScope, ScopeHandle};

/// A venue's booking calendar for one visible month.
pub struct CalendarView {
    backend: Arc<dyn ReservationBackend>,
    session: Session,
    scope: PageScope,
    venue_id: i64,
    booking_window_months: u32,
    range: Option<DateRange>,
    slots: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl CalendarView {
    pub fn new(
        backend: Arc<dyn ReservationBackend>,
        session: Session,
        venue_id: i64,
        booking_window_months: u32,
    ) -> Self {
        Self {
            backend,
            session,
            scope: PageScope::new(),
            venue_id,
            booking_window_months,
            range: None,
            slots: BTreeMap::new(),
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub async fn load_month(&mut self, year: i32, month: u32) -> Result<(), AppError> {
        self.range = Some(availability::month_range(year, month)?);
        self.reload().await
    }

    pub async fn reload(&mut self) -> Result<(), AppError> {
        let range = self
            .range
            .ok_or_else(|| AppError::Validation("no month selected".to_string()))?;

        let ticket = self.scope.begin();
        let raw = self
            .backend
            .venue_calendar(&self.session, self.venue_id, range)
            .await?;
        let raw = self.scope.accept(ticket, raw)?;

        let mut slots = BTreeMap::new();
        for (date, day) in raw {
            let day = day
                .iter()
                .map(normalize::normalize_slot)
                .collect::<Result<Vec<_>, _>>()?;
            slots.insert(date, day);
        }
        self.slots = slots;
        tracing::debug!(venue_id = self.venue_id, days = self.slots.len(), "loaded calendar");
        Ok(())
    }

    pub fn days(&self, today: NaiveDate) -> Result<Vec<CalendarDay>, AppError> {
        let range = self
            .range
            .ok_or_else(|| AppError::Validation("no month selected".to_string()))?;
        let window = DateRange::booking_window(today, self.booking_window_months);
        availability::calendar_days(range, &self.slots, window)
    }

    pub fn slots_for(&self, date: NaiveDate) -> &[TimeSlot] {
        self.slots.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Books `slot_id` on `date`. A slot without remaining capacity is
    /// refused before any request is made; otherwise the calendar reloads
    /// once the backend has answered, even if the answer cannot be read.
    pub async fn book(&mut self, date: NaiveDate, slot_id: i64) -> Result<Reservation, AppError> {
        let slot = self
            .slots_for(date)
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("slot {slot_id} on {date}")))?;
        availability::ensure_bookable(date, &slot)?;

        let request = NewReservation {
            date,
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
        };
        let created = self
            .backend
            .create_reservation(&self.session, self.venue_id, &request)
            .await?;
        tracing::info!(venue_id = self.venue_id, slot_id, %date, "reservation created");

        // The booking exists upstream now, so refresh before anything can fail.
        self.reload().await?;
        normalize::normalize(&fill_from_request(created, &request))
    }
}

/// The create endpoint does not echo every field; fill gaps from the request.
fn fill_from_request(created: Value, request: &NewReservation) -> Value {
    let mut record = json!({
        "date": request.date.format("%Y-%m-%d").to_string(),
        "start_time": request.start_time,
        "end_time": request.end_time,
    });
    if let (Some(base), Value::Object(fields)) = (record.as_object_mut(), created) {
        for (key, value) in fields {
            if !value.is_null() {
                base.insert(key, value);
            }
        }
    }
    record
}
