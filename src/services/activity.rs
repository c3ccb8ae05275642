use serde_json::Value;

use crate::errors::AppError;
use crate::models::reservation::parse_calendar_date;
use crate::models::{Activity, ActivityKind, ReservationStatus};
use crate::services::normalize::{
    id_field, normalize_time, text_field, UNKNOWN_SPORT_VENUE, UNKNOWN_VENUE,
};
use crate::services::status::classify;

pub fn format(raw: &Value) -> Result<Activity, AppError> {
    let id = id_field(raw, &["id"])?;
    let kind = ActivityKind::parse(&text_field(raw, &["activity_type"]).unwrap_or_default());

    let timestamp = text_field(raw, &["timestamp"])
        .ok_or_else(|| AppError::Validation(format!("activity {id} has no timestamp")))?;
    let date = text_field(raw, &["date"])
        .ok_or_else(|| AppError::Validation(format!("activity {id} has no date")))?;
    let date = parse_calendar_date(&date)
        .ok_or_else(|| AppError::Validation(format!("activity {id} has an unparseable date: {date:?}")))?;
    let status = text_field(raw, &["status"]).unwrap_or_default();

    Ok(Activity {
        id,
        headline: kind.headline().to_string(),
        kind,
        timestamp: format_timestamp(&timestamp)?,
        venue_name: text_field(raw, &["venue_name"]).unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
        sport_venue_name: text_field(raw, &["sport_venue_name"])
            .unwrap_or_else(|| UNKNOWN_SPORT_VENUE.to_string()),
        date: date.format("%Y-%m-%d").to_string(),
        start_time: normalize_time(&text_field(raw, &["start_time"]).unwrap_or_default())?,
        end_time: normalize_time(&text_field(raw, &["end_time"]).unwrap_or_default())?,
        badge: classify(&status),
        status: ReservationStatus::parse(&status),
    })
}

pub fn format_all(raws: &[Value]) -> Result<Vec<Activity>, AppError> {
    raws.iter().map(format).collect()
}

fn format_timestamp(s: &str) -> Result<String, AppError> {
    let s = s.trim();
    let parsed = s
        .parse::<chrono::DateTime<chrono::FixedOffset>>()
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
        })
        .ok_or_else(|| AppError::Validation(format!("unparseable timestamp: {s:?}")))?;
    Ok(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::status::BadgeColor;
    use serde_json::json;

    #[test]
    fn test_format_created_activity() {
        let raw = json!({
            "id": 11,
            "activity_type": "reservation_created",
            "timestamp": "2024-07-18T14:03:27.123456",
            "venue_name": "Main Hall",
            "sport_venue_name": "Court 2",
            "date": "2024-07-20",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
            "status": "pending"
        });
        let a = format(&raw).unwrap();
        assert_eq!(a.kind, ActivityKind::ReservationCreated);
        assert_eq!(a.headline, "Created reservation for");
        assert_eq!(a.timestamp, "2024-07-18 14:03:27");
        assert_eq!(a.date, "2024-07-20");
        assert_eq!(a.start_time, "09:00");
        assert_eq!(a.end_time, "10:00");
        assert_eq!(a.badge.color, BadgeColor::Blue);
        assert_eq!(a.badge.label, "Pending");
    }

    #[test]
    fn test_unknown_kind_and_missing_names() {
        let raw = json!({
            "id": 12,
            "activity_type": "profile_updated",
            "timestamp": "2024-07-18T14:03:27+08:00",
            "date": "2024-07-20T00:00:00",
            "start_time": "09:00",
            "end_time": "10:00",
            "status": "confirmed"
        });
        let a = format(&raw).unwrap();
        assert_eq!(a.kind, ActivityKind::Other);
        assert_eq!(a.headline, "Activity at");
        assert_ne!(a.headline, ActivityKind::ReservationCheckedIn.headline());
        assert_eq!(a.timestamp, "2024-07-18 14:03:27");
        assert_eq!(a.venue_name, UNKNOWN_VENUE);
        assert_eq!(a.sport_venue_name, UNKNOWN_SPORT_VENUE);
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let raw = json!({
            "id": 13, "activity_type": "reservation_cancelled", "timestamp": "yesterday",
            "date": "2024-07-20", "start_time": "09:00", "end_time": "10:00", "status": "cancelled"
        });
        assert!(matches!(format(&raw), Err(AppError::Validation(_))));
    }
}
