//! Month navigation limits.
//!
//! Everything here is computed from the calendars currently on screen, not
//! from the raw offset, so callers must re-evaluate after every rebuild.
//!
//! Clamping and disabling are separate checks. The clamp functions only
//! engage for multi-month steps: a single step is always passed through,
//! even right at a boundary, and it is the `is_*_disabled` predicates that
//! gate single-step controls.

use chrono::NaiveDate;
use shared::{CalendarMonth, NavigationDirection};
use tracing::debug;

use super::date_value::DateValue;

/// Largest backward step that does not move the first visible month before `min_date`
pub fn clamp_backward_step(calendars: &[CalendarMonth], step: u32, min_date: Option<NaiveDate>) -> u32 {
    let (Some(min_date), Some(first)) = (min_date, calendars.first()) else {
        return step;
    };
    if step <= 1 {
        return step;
    }

    let available = months_available(min_date.months_until(&first.start.start_of_month()));
    if available < step {
        debug!("Backward step {} clamped to {} by min date {}", step, available, min_date);
        available
    } else {
        step
    }
}

/// Largest forward step that does not move the last visible month past `max_date`
pub fn clamp_forward_step(calendars: &[CalendarMonth], step: u32, max_date: Option<NaiveDate>) -> u32 {
    let (Some(max_date), Some(last)) = (max_date, calendars.last()) else {
        return step;
    };
    if step <= 1 {
        return step;
    }

    let available = months_available(last.start.end_of_month().months_until(&max_date));
    if available < step {
        debug!("Forward step {} clamped to {} by max date {}", step, available, max_date);
        available
    } else {
        step
    }
}

/// True when the day before the first visible month is already before `min_date`
pub fn is_back_disabled(calendars: &[CalendarMonth], min_date: Option<NaiveDate>) -> bool {
    match (min_date, calendars.first()) {
        (Some(min_date), Some(first)) => first.start.start_of_month().subtract_days(1) < min_date,
        _ => false,
    }
}

/// True when the day after the last visible month is already past `max_date`
pub fn is_forward_disabled(calendars: &[CalendarMonth], max_date: Option<NaiveDate>) -> bool {
    match (max_date, calendars.last()) {
        (Some(max_date), Some(last)) => last.start.end_of_month().add_days(1) > max_date,
        _ => false,
    }
}

/// Cumulative offset after stepping in `direction` from `current_offset`
pub fn next_offset(
    direction: NavigationDirection,
    current_offset: i32,
    calendars: &[CalendarMonth],
    step: u32,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
) -> i32 {
    match direction {
        NavigationDirection::Back => {
            let admissible = clamp_backward_step(calendars, step, min_date);
            current_offset.saturating_sub_unsigned(admissible)
        }
        NavigationDirection::Forward => {
            let admissible = clamp_forward_step(calendars, step, max_date);
            current_offset.saturating_add_unsigned(admissible)
        }
    }
}

pub fn is_disabled(
    direction: NavigationDirection,
    calendars: &[CalendarMonth],
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
) -> bool {
    match direction {
        NavigationDirection::Back => is_back_disabled(calendars, min_date),
        NavigationDirection::Forward => is_forward_disabled(calendars, max_date),
    }
}

// A bound inside or beyond the visible window leaves no room to move
fn months_available(months: i32) -> u32 {
    u32::try_from(months).unwrap_or(0)
}
