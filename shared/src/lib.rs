use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of cells in every week row of a calendar grid
pub const DAYS_PER_WEEK: usize = 7;

/// Default short month names, indexed by 0-based month
pub const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Default short weekday names, indexed from Sunday (0) to Saturday (6)
pub const WEEKDAY_NAMES_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A real day shown in the calendar grid, with its classification flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateObj {
    pub date: NaiveDate,
    /// Matches one of the selected dates
    pub selected: bool,
    /// Inside the min/max bounds and not explicitly disabled
    pub selectable: bool,
    /// Same calendar day as the current date
    pub today: bool,
    /// Outside day borrowed from the previous month
    pub prev_month: bool,
    /// Outside day borrowed from the next month
    pub next_month: bool,
}

impl DateObj {
    /// Whether this day belongs to a neighbouring month
    pub fn is_outside_day(&self) -> bool {
        self.prev_month || self.next_month
    }
}

/// One cell of a week row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayCell {
    /// A real day
    Filled(DateObj),
    /// Placeholder keeping the row rectangular when outside days are hidden
    Empty,
}

impl DayCell {
    pub fn date_obj(&self) -> Option<&DateObj> {
        match self {
            DayCell::Filled(date_obj) => Some(date_obj),
            DayCell::Empty => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date_obj().map(|date_obj| date_obj.date)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DayCell::Empty)
    }
}

/// A week row always holds exactly seven cells
pub type Week = [DayCell; DAYS_PER_WEEK];

/// Represents one month of the calendar broken into week rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// First day of the month
    pub start: NaiveDate,
    /// 0-based month (0 = January, 11 = December)
    pub month: u32,
    pub year: i32,
    pub weeks: Vec<Week>,
}

impl CalendarMonth {
    /// All filled cells in grid order, outside days included
    pub fn days(&self) -> impl Iterator<Item = &DateObj> + '_ {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .filter_map(DayCell::date_obj)
    }

    /// Only the days that belong to this month
    pub fn month_days(&self) -> impl Iterator<Item = &DateObj> + '_ {
        self.days().filter(|date_obj| !date_obj.is_outside_day())
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.len() * DAYS_PER_WEEK
    }
}

/// Selection state handed to the grid builder
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "dates", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Single(NaiveDate),
    /// Zero, one (anchor) or two (closed interval) dates in chronological order
    Range(Vec<NaiveDate>),
}

impl Selection {
    pub fn dates(&self) -> &[NaiveDate] {
        match self {
            Selection::None => &[],
            Selection::Single(date) => std::slice::from_ref(date),
            Selection::Range(dates) => dates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates().is_empty()
    }
}

/// Direction of a month navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationDirection {
    Back,
    Forward,
}

impl NavigationDirection {
    pub fn verb(&self) -> &'static str {
        match self {
            NavigationDirection::Back => "back",
            NavigationDirection::Forward => "forward",
        }
    }
}

/// Date picker configuration. Names and format are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerConfig {
    pub date_format: String,
    pub month_names: Vec<String>,
    pub day_names: Vec<String>,
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub first_day_of_week: u8,
    pub months_to_display: usize,
    pub show_outside_days: bool,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            date_format: "YYYY-MM-DD".to_string(),
            month_names: MONTH_NAMES_SHORT.iter().map(|name| name.to_string()).collect(),
            day_names: WEEKDAY_NAMES_SHORT.iter().map(|name| name.to_string()).collect(),
            first_day_of_week: 0,
            months_to_display: 1,
            show_outside_days: false,
        }
    }
}

impl DatePickerConfig {
    /// Defaults used by the range picker
    pub fn range() -> Self {
        Self {
            date_format: "MM/DD/YYYY".to_string(),
            months_to_display: 2,
            ..Self::default()
        }
    }

    /// Bring out-of-range values back into their valid domain
    pub fn normalized(mut self) -> Self {
        self.first_day_of_week %= 7;
        self.months_to_display = self.months_to_display.max(1);
        self
    }
}

/// Calendars plus navigation state, as handed to a UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarsResponse {
    pub calendars: Vec<CalendarMonth>,
    pub offset: i32,
    pub back_disabled: bool,
    pub forward_disabled: bool,
}
