use serde::{Deserialize, Serialize};

use super::ReservationStatus;
use crate::services::status::StatusBadge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ReservationCreated,
    ReservationCancelled,
    ReservationCheckedIn,
    Other,
}

impl ActivityKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "reservation_created" => ActivityKind::ReservationCreated,
            "reservation_cancelled" => ActivityKind::ReservationCancelled,
            "reservation_checked_in" => ActivityKind::ReservationCheckedIn,
            _ => ActivityKind::Other,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ActivityKind::ReservationCreated => "Created reservation for",
            ActivityKind::ReservationCancelled => "Cancelled reservation for",
            ActivityKind::ReservationCheckedIn => "Checked in at",
            ActivityKind::Other => "Activity at",
        }
    }
}

/// A recent-activity timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub kind: ActivityKind,
    pub headline: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub venue_name: String,
    pub sport_venue_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: ReservationStatus,
    pub badge: StatusBadge,
}
