pub mod activity;
pub mod feedback;
pub mod reservation;
pub mod session;
pub mod slot;
pub mod stats;
pub mod venue;

pub use activity::{Activity, ActivityKind};
pub use feedback::{Feedback, NewFeedback};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use session::Session;
pub use slot::{CalendarDay, DateRange, DayAggregate, DayState, TimeSlot};
pub use stats::{ReservationStats, StatisticsSummary, UserReservationCount};
pub use venue::Venue;
