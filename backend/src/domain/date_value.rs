//! Day-granularity date operations used by the calendar domain.
//!
//! `chrono::NaiveDate` already provides ordering, accessors and checked
//! arithmetic. This module layers the unit normalizations the grid builder
//! and navigation logic need on top of it, as a plain extension trait with
//! no global registration. Arithmetic saturates at the representable date
//! limits instead of panicking.

use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Extension operations on a calendar date
pub trait DateValue: Sized {
    /// Day of week where 0 = Sunday and 6 = Saturday
    fn day_of_week(&self) -> u32;
    fn start_of_month(&self) -> Self;
    /// Last day of the month this date falls in
    fn end_of_month(&self) -> Self;
    /// First day of the week containing this date, for a week starting on `first_day_of_week`
    fn start_of_week(&self, first_day_of_week: u8) -> Self;
    fn add_days(&self, days: i64) -> Self;
    fn subtract_days(&self, days: i64) -> Self {
        self.add_days(-days)
    }
    /// Adds months, clamping the day to the target month's length
    fn add_months(&self, months: i32) -> Self;
    fn subtract_months(&self, months: i32) -> Self {
        self.add_months(-months)
    }
    fn month_length(&self) -> u32;
    fn is_same_day(&self, other: &Self) -> bool;
    fn is_same_month(&self, other: &Self) -> bool;
    /// Whole months from `self` to `later`, truncated toward zero.
    /// Negative when `later` is actually earlier.
    fn months_until(&self, later: &Self) -> i32;
}

impl DateValue for NaiveDate {
    fn day_of_week(&self) -> u32 {
        self.weekday().num_days_from_sunday()
    }

    fn start_of_month(&self) -> Self {
        self.with_day(1).unwrap_or(*self)
    }

    fn end_of_month(&self) -> Self {
        self.start_of_month()
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    fn start_of_week(&self, first_day_of_week: u8) -> Self {
        let lead = (self.day_of_week() + 7 - u32::from(first_day_of_week % 7)) % 7;
        self.subtract_days(i64::from(lead))
    }

    fn add_days(&self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
    }

    fn add_months(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or(if months >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
    }

    fn month_length(&self) -> u32 {
        self.end_of_month().day()
    }

    fn is_same_day(&self, other: &Self) -> bool {
        self == other
    }

    fn is_same_month(&self, other: &Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    fn months_until(&self, later: &Self) -> i32 {
        let mut months = (later.year() - self.year()) * 12 + later.month() as i32
            - self.month() as i32;

        if months > 0 && self.add_months(months) > *later {
            months -= 1;
        } else if months < 0 && self.add_months(months) < *later {
            months += 1;
        }

        months
    }
}

/// First day of a month given a 0-based month index that may over- or underflow.
///
/// `first_of_month(2024, 12)` is January 1st 2025, `first_of_month(2024, -1)`
/// is December 1st 2023.
pub fn first_of_month(year: i32, month_index: i64) -> NaiveDate {
    let total = i64::from(year) * 12 + month_index;
    let normalized_year = total.div_euclid(12);
    let normalized_month = total.rem_euclid(12) as u32 + 1;

    i32::try_from(normalized_year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, normalized_month, 1))
        .unwrap_or(if total < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX.start_of_month()
        })
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
