pub mod activity;
pub mod availability;
pub mod backend;
pub mod calendar;
pub mod feedback;
pub mod lifecycle;
pub mod listing;
pub mod normalize;
pub mod page;
pub mod reservations;
pub mod statistics;
pub mod status;
