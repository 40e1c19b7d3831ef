//! Calendar domain logic for the date picker.
//!
//! This module turns a reference date, selection and bounds into month grids
//! of week rows. Every grid is rebuilt from scratch from its inputs; nothing
//! is cached or mutated between builds, so equal queries always produce
//! equal calendars. Per-day classification is delegated to the selection
//! module.

use chrono::{Datelike, NaiveDate};
use shared::{CalendarMonth, DateObj, DayCell, Week, DAYS_PER_WEEK, MONTH_NAMES_SHORT, WEEKDAY_NAMES_SHORT};
use tracing::{debug, info};

use super::commands::calendar::{CalendarsQuery, GridOptions};
use super::date_value::{self, first_of_month, DateValue};
use super::selection;

/// Calendar service that builds month grids
#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    /// Pinned "today"; the local clock is read per build when unset
    today: Option<NaiveDate>,
}

impl CalendarService {
    /// Create a new CalendarService reading today's date from the local clock
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Create a CalendarService with a fixed notion of today
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(date_value::today)
    }

    /// Build `months_to_display` consecutive months starting at the clamped
    /// reference date's month shifted by `offset`.
    pub fn build_calendars(&self, query: &CalendarsQuery) -> Vec<CalendarMonth> {
        let today = self.today();
        let grid = &query.grid;
        let start = clamp_reference_date(query.date.unwrap_or(today), grid.min_date, grid.max_date);
        let months_to_display = query.months_to_display.max(1);

        info!(
            "🗓️ CALENDAR: Building {} month(s) from {} with offset {}",
            months_to_display, start, query.offset
        );

        (0..months_to_display)
            .map(|i| {
                let month_index = i64::from(start.month0()) + i as i64 + i64::from(query.offset);
                self.build_month_on(start.year(), month_index, grid, today)
            })
            .collect()
    }

    /// Build a single month. `month_index` is 0-based and rolls over into
    /// neighbouring years when outside 0..=11.
    pub fn build_month(&self, year: i32, month_index: i64, options: &GridOptions) -> CalendarMonth {
        self.build_month_on(year, month_index, options, self.today())
    }

    fn build_month_on(
        &self,
        year: i32,
        month_index: i64,
        options: &GridOptions,
        today: NaiveDate,
    ) -> CalendarMonth {
        let start = first_of_month(year, month_index);
        let end = start.end_of_month();
        let first_day_of_week = u32::from(options.first_day_of_week % 7);

        let lead = (start.day_of_week() + 7 - first_day_of_week) % 7;
        let trail = 6 - (end.day_of_week() + 7 - first_day_of_week) % 7;

        let front: Vec<DayCell> = if options.show_outside_days {
            (1..=lead)
                .rev()
                .map(|days_back| {
                    let date = start.subtract_days(i64::from(days_back));
                    DayCell::Filled(classify(date, options, false, Outside::PrevMonth))
                })
                .collect()
        } else {
            vec![DayCell::Empty; lead as usize]
        };

        let days: Vec<DayCell> = (0..start.month_length())
            .map(|day_offset| {
                let date = start.add_days(i64::from(day_offset));
                DayCell::Filled(classify(date, options, date.is_same_day(&today), Outside::No))
            })
            .collect();

        let back: Vec<DayCell> = if options.show_outside_days {
            (1..=trail)
                .map(|days_forward| {
                    let date = end.add_days(i64::from(days_forward));
                    DayCell::Filled(classify(date, options, false, Outside::NextMonth))
                })
                .collect()
        } else {
            vec![DayCell::Empty; trail as usize]
        };

        let cells: Vec<DayCell> = front.into_iter().chain(days).chain(back).collect();
        let weeks = into_weeks(&cells);

        debug!(
            "🗓️ CALENDAR: {}-{:02} lead={} trail={} weeks={}",
            start.year(),
            start.month(),
            lead,
            trail,
            weeks.len()
        );

        CalendarMonth {
            start,
            month: start.month0(),
            year: start.year(),
            weeks,
        }
    }

    /// Weekday header labels rotated so the row starts at `first_day_of_week`.
    /// Falls back to the default short names unless exactly seven are given.
    pub fn weekday_labels(&self, first_day_of_week: u8, day_names: &[String]) -> Vec<String> {
        let start = usize::from(first_day_of_week % 7);
        (0..DAYS_PER_WEEK)
            .map(|i| {
                let index = (start + i) % DAYS_PER_WEEK;
                if day_names.len() == DAYS_PER_WEEK {
                    day_names[index].clone()
                } else {
                    WEEKDAY_NAMES_SHORT[index].to_string()
                }
            })
            .collect()
    }

    /// Heading such as "Jan 2025"
    pub fn month_heading(&self, calendar: &CalendarMonth, month_names: &[String]) -> String {
        let index = calendar.month as usize % 12;
        let name = match month_names.get(index) {
            Some(name) if month_names.len() == 12 => name.as_str(),
            _ => MONTH_NAMES_SHORT[index],
        };
        format!("{} {}", name, calendar.year)
    }
}

/// Pull the reference date into `[min_date, max_date]`. Each bound is applied
/// independently; with inverted bounds the max wins.
pub fn clamp_reference_date(
    date: NaiveDate,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
) -> NaiveDate {
    let mut start = date;
    if let Some(min) = min_date {
        if start < min {
            start = min;
        }
    }
    if let Some(max) = max_date {
        if max < start {
            start = max;
        }
    }
    start
}

#[derive(Clone, Copy)]
enum Outside {
    No,
    PrevMonth,
    NextMonth,
}

fn classify(date: NaiveDate, options: &GridOptions, today: bool, outside: Outside) -> DateObj {
    DateObj {
        date,
        selected: selection::is_selected(&options.selection, date),
        selectable: selection::is_selectable_with(
            options.min_date,
            options.max_date,
            &options.disabled_dates,
            date,
        ),
        today,
        prev_month: matches!(outside, Outside::PrevMonth),
        next_month: matches!(outside, Outside::NextMonth),
    }
}

fn into_weeks(cells: &[DayCell]) -> Vec<Week> {
    cells
        .chunks(DAYS_PER_WEEK)
        .map(|chunk| {
            let mut week = [DayCell::Empty; DAYS_PER_WEEK];
            week[..chunk.len()].copy_from_slice(chunk);
            week
        })
        .collect()
}
