use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Reservation, ReservationStatus};
use crate::services::normalize::normalize_time;
use crate::services::status::{classify, StatusBadge};

/// A reservation counts as upcoming up to this many days ahead of today.
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Only(ReservationStatus::parse(s))
        }
    }

    pub fn matches(&self, status: &ReservationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// A reservation plus the flags the list view renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRow {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub badge: StatusBadge,
    pub is_past: bool,
    pub can_cancel: bool,
    pub is_upcoming: bool,
}

/// Filters, orders and flags reservations for display.
///
/// Every input date must parse; a malformed one fails the whole call with
/// `AppError::Validation`, whatever the filters are. Ordering is by date,
/// then status rank (confirmed, pending, cancelled), then start time, and
/// is stable for equal keys.
///
/// Start times are expected as normalized `HH:MM`, as `normalize` produces.
/// Other readable forms such as `9:00` are compared by their time of day;
/// anything unreadable falls back to the raw text.
pub fn process(
    reservations: &[Reservation],
    status_filter: &StatusFilter,
    date_filter: Option<NaiveDate>,
    now: NaiveDateTime,
) -> Result<Vec<ReservationRow>, AppError> {
    let dated = reservations
        .iter()
        .map(|r| r.parsed_date().map(|d| (d, r)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut kept: Vec<(NaiveDate, &Reservation)> = dated
        .into_iter()
        .filter(|(_, r)| status_filter.matches(&r.status))
        .filter(|(d, _)| date_filter.map_or(true, |wanted| *d == wanted))
        .collect();

    kept.sort_by(|(da, a), (db, b)| {
        da.cmp(db)
            .then_with(|| a.status.rank().cmp(&b.status.rank()))
            .then_with(|| start_key(a).cmp(&start_key(b)))
    });

    let today = now.date();
    Ok(kept
        .into_iter()
        .map(|(date, r)| derive_row(date, r, today))
        .collect())
}

fn start_key(reservation: &Reservation) -> String {
    normalize_time(&reservation.start_time).unwrap_or_else(|_| reservation.start_time.clone())
}

fn derive_row(date: NaiveDate, reservation: &Reservation, today: NaiveDate) -> ReservationRow {
    let cancelled = reservation.status.is_cancelled();
    let is_past = date < today;
    let gap = (date - today).num_days();
    let is_upcoming = date > today
        && gap <= UPCOMING_WINDOW_DAYS
        && !cancelled
        && !reservation.is_checked_in();

    ReservationRow {
        badge: classify(reservation.status.as_str()),
        is_past,
        can_cancel: !is_past && !cancelled,
        is_upcoming,
        reservation: reservation.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(id: i64, date: &str, status: &str, start: &str) -> Reservation {
        Reservation {
            id,
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: "23:00".to_string(),
            venue_name: "Main Hall".to_string(),
            sport_venue_name: "Court 1".to_string(),
            status: ReservationStatus::parse(status),
            checked_in_at: None,
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn ids(rows: &[ReservationRow]) -> Vec<i64> {
        rows.iter().map(|r| r.reservation.id).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let rows = process(&[], &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_status_priority_on_same_day() {
        let input = vec![
            res(1, "2024-07-20", "pending", "09:00"),
            res(2, "2024-07-20", "confirmed", "08:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_status_beats_start_time() {
        let input = vec![
            res(1, "2024-07-20", "pending", "07:00"),
            res(2, "2024-07-20", "confirmed", "09:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_date_then_status_then_time() {
        let input = vec![
            res(1, "2024-07-21", "confirmed", "08:00"),
            res(2, "2024-07-20", "cancelled", "07:00"),
            res(3, "2024-07-20", "pending", "10:00"),
            res(4, "2024-07-20", "pending", "09:30"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_unpadded_start_time_sorts_by_time_of_day() {
        let input = vec![
            res(1, "2024-07-20", "pending", "10:00"),
            res(2, "2024-07-20", "pending", "9:00"),
            res(3, "2024-07-20", "pending", "09:30:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let input = vec![
            res(5, "2024-07-20", "pending", "09:00"),
            res(3, "2024-07-20", "pending", "09:00"),
            res(9, "2024-07-20", "pending", "09:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![5, 3, 9]);
    }

    #[test]
    fn test_status_filter() {
        let input = vec![
            res(1, "2024-07-20", "pending", "09:00"),
            res(2, "2024-07-20", "Confirmed", "08:00"),
            res(3, "2024-07-22", "confirmed", "08:00"),
        ];
        let filter = StatusFilter::parse("confirmed");
        let rows = process(&input, &filter, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![2, 3]);
    }

    #[test]
    fn test_date_filter_matches_calendar_day() {
        let input = vec![
            res(1, "2024-07-20", "pending", "09:00"),
            res(2, "2024-07-20T18:00:00", "pending", "18:00"),
            res(3, "2024-07-21", "pending", "08:00"),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 7, 20);
        let rows = process(&input, &StatusFilter::All, day, at("2024-07-01 12:00")).unwrap();
        assert_eq!(ids(&rows), vec![1, 2]);
    }

    #[test]
    fn test_unparseable_date_is_fatal() {
        let input = vec![
            res(1, "2024-07-20", "pending", "09:00"),
            res(2, "next tuesday", "pending", "09:00"),
        ];
        let err = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let day = NaiveDate::from_ymd_opt(2024, 7, 20);
        let err = process(&input, &StatusFilter::All, day, at("2024-07-01 12:00")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_cancelled_can_never_be_cancelled() {
        let input = vec![
            res(1, "2024-06-01", "cancelled", "09:00"),
            res(2, "2024-07-01", "cancelled", "09:00"),
            res(3, "2024-08-01", "cancelled", "09:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert!(rows.iter().all(|r| !r.can_cancel));
        assert!(rows.iter().all(|r| !r.is_upcoming));
    }

    #[test]
    fn test_today_is_neither_past_nor_upcoming() {
        let input = vec![res(1, "2024-07-01", "confirmed", "09:00")];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert!(!rows[0].is_past);
        assert!(!rows[0].is_upcoming);
        assert!(rows[0].can_cancel);
    }

    #[test]
    fn test_past_reservation() {
        let input = vec![res(1, "2024-06-30", "confirmed", "23:00")];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 00:30")).unwrap();
        assert!(rows[0].is_past);
        assert!(!rows[0].can_cancel);
        assert!(!rows[0].is_upcoming);
    }

    #[test]
    fn test_upcoming_window_boundary() {
        let input = vec![
            res(1, "2024-07-02", "pending", "09:00"),
            res(2, "2024-07-04", "pending", "09:00"),
            res(3, "2024-07-05", "pending", "09:00"),
        ];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        let upcoming: Vec<bool> = rows.iter().map(|r| r.is_upcoming).collect();
        assert_eq!(upcoming, vec![true, true, false]);
    }

    #[test]
    fn test_checked_in_is_not_upcoming() {
        let mut r = res(1, "2024-07-02", "confirmed", "09:00");
        r.checked_in_at = Some("2024-07-02T08:55:00".to_string());
        let rows = process(&[r], &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert!(!rows[0].is_upcoming);
        assert!(rows[0].can_cancel);
    }

    #[test]
    fn test_badge_is_attached() {
        let input = vec![res(1, "2024-07-02", "PENDING", "09:00")];
        let rows = process(&input, &StatusFilter::All, None, at("2024-07-01 12:00")).unwrap();
        assert_eq!(rows[0].badge, classify("pending"));
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse("all"), StatusFilter::All);
        assert_eq!(StatusFilter::parse("ALL"), StatusFilter::All);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse("Cancelled"),
            StatusFilter::Only(ReservationStatus::Cancelled)
        );
    }
}
