use serde::{Deserialize, Serialize};

/// Body of `GET {stats}/user-reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationStats {
    #[serde(default)]
    pub total_reservations: u64,
    #[serde(default)]
    pub user_reservations: Vec<UserReservationCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReservationCount {
    pub username: String,
    pub reservation_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_reservations: u64,
    pub most_active_user: String,
    pub average_reservations: String,
}
