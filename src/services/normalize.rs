//! Maps raw upstream objects onto the display models.
//!
//! The reservation endpoints return two shapes for the same record: list
//! rows in snake_case and detail objects in camelCase. Each shape has a
//! [`FieldMap`] naming the keys that may carry each logical field, most
//! specific first; the first non-empty one wins.

use chrono::NaiveTime;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::reservation::parse_calendar_date;
use crate::models::{Reservation, ReservationStatus, TimeSlot};

pub const UNKNOWN_VENUE: &str = "Unknown venue";
pub const UNKNOWN_SPORT_VENUE: &str = "Unknown sport venue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeVersion {
    /// snake_case rows from `/user-reservations` and the admin list.
    Legacy,
    /// camelCase objects from the reservation detail endpoint.
    Detail,
}

/// Candidate keys per logical field. Dotted keys address nested objects.
pub struct FieldMap {
    pub id: &'static [&'static str],
    pub date: &'static [&'static str],
    pub start_time: &'static [&'static str],
    pub end_time: &'static [&'static str],
    pub venue_name: &'static [&'static str],
    pub sport_venue_name: &'static [&'static str],
    pub status: &'static [&'static str],
    pub checked_in_at: &'static [&'static str],
}

const LEGACY_FIELDS: FieldMap = FieldMap {
    id: &["id"],
    date: &["reservation_date", "date"],
    start_time: &["actual_start_time", "start_time"],
    end_time: &["actual_end_time", "end_time"],
    venue_name: &["venue_name", "venue.name"],
    sport_venue_name: &["sport_venue_name", "sport_venue.name"],
    status: &["status"],
    checked_in_at: &["checked_in_at"],
};

const DETAIL_FIELDS: FieldMap = FieldMap {
    id: &["id"],
    date: &["reservationDate", "date"],
    start_time: &["actualStartTime", "startTime"],
    end_time: &["actualEndTime", "endTime"],
    venue_name: &["venueName", "venue.name"],
    sport_venue_name: &["sportVenueName", "sportVenue.name"],
    status: &["status"],
    checked_in_at: &["checkedInAt"],
};

/// Keys that only the detail shape uses for required fields.
const DETAIL_MARKERS: &[&str] = &["startTime", "actualStartTime", "reservationDate"];

impl ShapeVersion {
    /// A row is a detail object only if it carries detail-shaped required
    /// fields; stray camelCase extras such as `createdAt` do not count.
    pub fn detect(raw: &Value) -> Self {
        let detail = raw
            .as_object()
            .map(|obj| DETAIL_MARKERS.iter().any(|k| obj.contains_key(*k)))
            .unwrap_or(false);
        if detail {
            ShapeVersion::Detail
        } else {
            ShapeVersion::Legacy
        }
    }

    pub fn fields(self) -> &'static FieldMap {
        match self {
            ShapeVersion::Legacy => &LEGACY_FIELDS,
            ShapeVersion::Detail => &DETAIL_FIELDS,
        }
    }
}

pub fn normalize(raw: &Value) -> Result<Reservation, AppError> {
    normalize_as(raw, ShapeVersion::detect(raw))
}

pub fn normalize_all(raws: &[Value]) -> Result<Vec<Reservation>, AppError> {
    raws.iter().map(normalize).collect()
}

pub fn normalize_as(raw: &Value, version: ShapeVersion) -> Result<Reservation, AppError> {
    if !raw.is_object() {
        return Err(AppError::Validation(format!(
            "reservation must be an object, got {raw}"
        )));
    }
    let fields = version.fields();

    let id = id_field(raw, fields.id)?;
    let date = text_field(raw, fields.date)
        .ok_or_else(|| missing(id, "date"))?;
    // Unparseable dates are left for the listing engine to reject.
    let date = parse_calendar_date(&date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or(date);

    let start_time = text_field(raw, fields.start_time).ok_or_else(|| missing(id, "start time"))?;
    let end_time = text_field(raw, fields.end_time).ok_or_else(|| missing(id, "end time"))?;
    let status = text_field(raw, fields.status).ok_or_else(|| missing(id, "status"))?;

    Ok(Reservation {
        id,
        date,
        start_time: normalize_time(&start_time)?,
        end_time: normalize_time(&end_time)?,
        venue_name: text_field(raw, fields.venue_name)
            .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
        sport_venue_name: text_field(raw, fields.sport_venue_name)
            .unwrap_or_else(|| UNKNOWN_SPORT_VENUE.to_string()),
        status: ReservationStatus::parse(&status),
        checked_in_at: text_field(raw, fields.checked_in_at),
    })
}

/// Calendar slot rows. `capacity` is what the backend calls the remaining
/// capacity; a missing total falls back to the available figure.
pub fn normalize_slot(raw: &Value) -> Result<TimeSlot, AppError> {
    let id = id_field(raw, &["id"])?;
    let start_time = text_field(raw, &["start_time", "startTime"])
        .ok_or_else(|| AppError::Validation(format!("slot {id} is missing its start time")))?;
    let end_time = text_field(raw, &["end_time", "endTime"])
        .ok_or_else(|| AppError::Validation(format!("slot {id} is missing its end time")))?;

    let available = capacity_field(raw, id, &["available_capacity", "availableCapacity", "capacity"])?
        .ok_or_else(|| AppError::Validation(format!("slot {id} is missing its capacity")))?;
    let total = capacity_field(raw, id, &["total_capacity", "totalCapacity"])?.unwrap_or(available);

    Ok(TimeSlot {
        id,
        start_time: normalize_time(&start_time)?,
        end_time: normalize_time(&end_time)?,
        available_capacity: available,
        total_capacity: total,
    })
}

/// Renders a time of day as `HH:MM`, dropping seconds and any date part.
pub fn normalize_time(s: &str) -> Result<String, AppError> {
    let s = s.trim();
    let time = ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.time())
        })
        .or_else(|| {
            s.parse::<chrono::DateTime<chrono::FixedOffset>>()
                .ok()
                .map(|dt| dt.time())
        })
        .ok_or_else(|| AppError::Validation(format!("unparseable time: {s:?}")))?;
    Ok(time.format("%H:%M").to_string())
}

/// First candidate key holding a non-blank string or a number.
pub(crate) fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match lookup(raw, key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn id_field(raw: &Value, keys: &[&str]) -> Result<i64, AppError> {
    keys.iter()
        .find_map(|key| match lookup(raw, key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .ok_or_else(|| AppError::Validation(format!("record without a usable id: {raw}")))
}

fn capacity_field(raw: &Value, id: i64, keys: &[&str]) -> Result<Option<u32>, AppError> {
    let Some(value) = keys.iter().find_map(|key| lookup(raw, key).filter(|v| !v.is_null())) else {
        return Ok(None);
    };
    value
        .as_i64()
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| AppError::Validation(format!("slot {id} has an invalid capacity: {value}")))
}

fn lookup<'a>(raw: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(raw, |value, part| value.as_object()?.get(part))
}

fn missing(id: i64, what: &str) -> AppError {
    AppError::Validation(format!("reservation {id} is missing its {what}"))
}
