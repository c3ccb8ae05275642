use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{Reservation, ReservationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Cancel,
    CheckIn,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Confirm => "confirm",
            Transition::Cancel => "cancel",
            Transition::CheckIn => "check-in",
        }
    }
}

/// Rejects transitions the reservation state machine does not allow.
/// Cancelled is terminal.
pub fn check(reservation: &Reservation, transition: Transition) -> Result<(), AppError> {
    let allowed = match (&reservation.status, transition) {
        (ReservationStatus::Pending, Transition::Confirm) => true,
        (ReservationStatus::Pending | ReservationStatus::Confirmed, Transition::Cancel) => true,
        (ReservationStatus::Confirmed, Transition::CheckIn) => !reservation.is_checked_in(),
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "cannot {} reservation {} while it is {}{}",
            transition.as_str(),
            reservation.id,
            reservation.status,
            if reservation.is_checked_in() { " and checked in" } else { "" }
        )))
    }
}

/// Cancelling needs the reservation day to be today or later; the same cutoff
/// the listing uses for `can_cancel`.
pub fn ensure_not_past(reservation: &Reservation, today: NaiveDate) -> Result<(), AppError> {
    let date = reservation.parsed_date()?;
    if date < today {
        return Err(AppError::Validation(format!(
            "cannot cancel reservation {} on {date}, the day has passed",
            reservation.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            date: "2024-07-20".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            venue_name: "Hall".to_string(),
            sport_venue_name: "Court".to_string(),
            status,
            checked_in_at: None,
        }
    }

    #[test]
    fn test_pending_transitions() {
        let r = with_status(ReservationStatus::Pending);
        assert!(check(&r, Transition::Confirm).is_ok());
        assert!(check(&r, Transition::Cancel).is_ok());
        assert!(check(&r, Transition::CheckIn).is_err());
    }

    #[test]
    fn test_confirmed_transitions() {
        let r = with_status(ReservationStatus::Confirmed);
        assert!(check(&r, Transition::Confirm).is_err());
        assert!(check(&r, Transition::Cancel).is_ok());
        assert!(check(&r, Transition::CheckIn).is_ok());
    }

    #[test]
    fn test_check_in_only_once() {
        let mut r = with_status(ReservationStatus::Confirmed);
        r.checked_in_at = Some("2024-07-20T08:55:00".to_string());
        let err = check(&r, Transition::CheckIn).unwrap_err();
        assert!(err.to_string().contains("checked in"));
        assert!(check(&r, Transition::Cancel).is_ok());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let r = with_status(ReservationStatus::Cancelled);
        for t in [Transition::Confirm, Transition::Cancel, Transition::CheckIn] {
            assert!(matches!(check(&r, t), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_unknown_status_allows_nothing() {
        let r = with_status(ReservationStatus::Other("no_show".to_string()));
        assert!(check(&r, Transition::Cancel).is_err());
    }

    #[test]
    fn test_past_reservation_cannot_be_cancelled() {
        let r = with_status(ReservationStatus::Confirmed);
        let day = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();

        assert!(ensure_not_past(&r, day).is_ok());
        assert!(ensure_not_past(&r, day.pred_opt().unwrap()).is_ok());

        let err = ensure_not_past(&r, day.succ_opt().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("has passed"));
    }
}
