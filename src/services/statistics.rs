use crate::models::{ReservationStats, StatisticsSummary};

pub fn summarize(stats: &ReservationStats) -> StatisticsSummary {
    // Ties go to the later entry.
    let most_active = stats
        .user_reservations
        .iter()
        .reduce(|best, cur| if best.reservation_count > cur.reservation_count { best } else { cur });

    let users = stats.user_reservations.len();
    StatisticsSummary {
        total_reservations: stats.total_reservations,
        most_active_user: most_active
            .map(|u| format!("{} ({})", u.username, u.reservation_count))
            .unwrap_or_else(|| "N/A".to_string()),
        average_reservations: if users > 0 {
            format!("{:.2}", stats.total_reservations as f64 / users as f64)
        } else {
            "N/A".to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserReservationCount;

    fn user(name: &str, count: u64) -> UserReservationCount {
        UserReservationCount { username: name.to_string(), reservation_count: count }
    }

    #[test]
    fn test_summary() {
        let stats = ReservationStats {
            total_reservations: 10,
            user_reservations: vec![user("ana", 3), user("bo", 6), user("cy", 1)],
        };
        let s = summarize(&stats);
        assert_eq!(s.total_reservations, 10);
        assert_eq!(s.most_active_user, "bo (6)");
        assert_eq!(s.average_reservations, "3.33");
    }

    #[test]
    fn test_tie_goes_to_later_user() {
        let stats = ReservationStats {
            total_reservations: 4,
            user_reservations: vec![user("ana", 2), user("bo", 2)],
        };
        assert_eq!(summarize(&stats).most_active_user, "bo (2)");
    }

    #[test]
    fn test_no_users() {
        let s = summarize(&ReservationStats { total_reservations: 0, user_reservations: vec![] });
        assert_eq!(s.most_active_user, "N/A");
        assert_eq!(s.average_reservations, "N/A");
    }
}
