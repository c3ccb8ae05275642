use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{CalendarDay, DateRange, DayAggregate, DayState, TimeSlot};

/// Sums a day's slots and classifies the day.
///
/// A slot reporting more available than total capacity is a data error.
pub fn aggregate(date: NaiveDate, day_slots: &[TimeSlot]) -> Result<DayAggregate, AppError> {
    let mut total_available: u64 = 0;
    let mut total_capacity: u64 = 0;

    for slot in day_slots {
        if slot.available_capacity > slot.total_capacity {
            return Err(AppError::Validation(format!(
                "slot {} on {date} reports {} available of {} total",
                slot.id, slot.available_capacity, slot.total_capacity
            )));
        }
        total_available += u64::from(slot.available_capacity);
        total_capacity += u64::from(slot.total_capacity);
    }

    let state = if day_slots.is_empty() {
        DayState::Closed
    } else if total_available == 0 {
        DayState::Full
    } else {
        DayState::Available
    };

    Ok(DayAggregate {
        date,
        total_available,
        total_capacity,
        state,
    })
}

/// Local pre-check before a booking request goes out.
pub fn ensure_bookable(date: NaiveDate, slot: &TimeSlot) -> Result<(), AppError> {
    if slot.is_bookable() {
        Ok(())
    } else {
        Err(AppError::CapacityExceeded {
            slot_id: slot.id,
            date,
        })
    }
}

/// First and last day of a month.
pub fn month_range(year: i32, month: u32) -> Result<DateRange, AppError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("invalid month: {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::Validation(format!("invalid month: {year}-{month}")))?;
    Ok(DateRange { start, end })
}

/// One cell per day of `range`. Days missing from `by_date` are closed, and
/// days outside `window` are never selectable.
pub fn calendar_days(
    range: DateRange,
    by_date: &BTreeMap<NaiveDate, Vec<TimeSlot>>,
    window: DateRange,
) -> Result<Vec<CalendarDay>, AppError> {
    range
        .days()
        .map(|date| {
            let slots = by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            let aggregate = aggregate(date, slots)?;
            let selectable = aggregate.is_selectable() && window.contains(date);
            Ok(CalendarDay {
                aggregate,
                selectable,
            })
        })
        .collect()
}
