use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
    pub available_capacity: u32,
    pub total_capacity: u32,
}

impl TimeSlot {
    pub fn is_bookable(&self) -> bool {
        self.available_capacity > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Closed,
    Full,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total_available: u64,
    pub total_capacity: u64,
    pub state: DayState,
}

impl DayAggregate {
    pub fn is_selectable(&self) -> bool {
        self.state == DayState::Available
    }
}

/// One cell of the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    #[serde(flatten)]
    pub aggregate: DayAggregate,
    pub selectable: bool,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take_while(move |d| *d <= self.end)
    }

    /// `today` through the same day `months` months later (clamped to month end).
    pub fn booking_window(today: NaiveDate, months: u32) -> Self {
        let end = today
            .checked_add_months(chrono::Months::new(months))
            .or_else(|| today.checked_add_days(Days::new(u64::from(months) * 30)))
            .unwrap_or(today);
        Self { start: today, end }
    }
}
