use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Display-ready reservation, produced by `services::normalize`.
///
/// The serialized form uses the same snake_case keys the list endpoint
/// returns, so a serialized `Reservation` normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    /// ISO calendar date. Kept as text so a malformed upstream value is
    /// reported by the listing engine rather than lost here.
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub venue_name: String,
    pub sport_venue_name: String,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<String>,
}

impl Reservation {
    pub fn parsed_date(&self) -> Result<NaiveDate, AppError> {
        parse_calendar_date(&self.date).ok_or_else(|| {
            AppError::Validation(format!(
                "reservation {} has an unparseable date: {:?}",
                self.id, self.date
            ))
        })
    }

    pub fn is_checked_in(&self) -> bool {
        self.checked_in_at.is_some()
    }
}

/// Accepts `YYYY-MM-DD` or a full ISO date-time and returns its day.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = s.parse::<chrono::DateTime<chrono::FixedOffset>>() {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    /// Any other upstream status, lowercased.
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "pending" => ReservationStatus::Pending,
            "confirmed" => ReservationStatus::Confirmed,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other(lower),
        }
    }

    /// Sort priority within a day: confirmed, pending, cancelled, then anything else.
    pub fn rank(&self) -> u8 {
        match self {
            ReservationStatus::Confirmed => 0,
            ReservationStatus::Pending => 1,
            ReservationStatus::Cancelled => 2,
            ReservationStatus::Other(_) => 3,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReservationStatus::Cancelled)
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        ReservationStatus::parse(&s)
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for `POST /reservations`; the backend client adds `user_id` and `venue_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}
