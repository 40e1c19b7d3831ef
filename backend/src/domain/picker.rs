//! Single and range date picker state.
//!
//! These controllers hold the view state a picker widget owns (selection,
//! date in view, pagination offset, open flag, hover preview) and apply the
//! selection policies, leaving rendering to the UI layer. Calendars are
//! rebuilt from that state on demand.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared::{CalendarMonth, CalendarsResponse, DateObj, DatePickerConfig, Selection};
use tracing::info;

use super::calendar::CalendarService;
use super::commands::calendar::{CalendarsQuery, GridOptions};
use super::errors::DatePickerError;
use super::interaction::{self, DateProps, NavigationProps};
use super::navigation;
use super::selection;

/// View state shared by both picker kinds
#[derive(Debug, Clone)]
struct PickerView {
    config: DatePickerConfig,
    calendar: CalendarService,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    date_in_view: Option<NaiveDate>,
    offset: i32,
    open: bool,
    close_on_select: bool,
}

impl PickerView {
    fn new(config: DatePickerConfig, calendar: CalendarService) -> Self {
        Self {
            config: config.normalized(),
            calendar,
            min_date: None,
            max_date: None,
            date_in_view: None,
            offset: 0,
            open: false,
            close_on_select: true,
        }
    }

    fn query(&self, selection: Selection, disabled_dates: &BTreeSet<NaiveDate>) -> CalendarsQuery {
        CalendarsQuery {
            date: self.date_in_view,
            months_to_display: self.config.months_to_display,
            offset: self.offset,
            grid: GridOptions {
                selection,
                min_date: self.min_date,
                max_date: self.max_date,
                disabled_dates: disabled_dates.clone(),
                ..GridOptions::from_config(&self.config)
            },
        }
    }

    fn response(&self, calendars: Vec<CalendarMonth>) -> CalendarsResponse {
        CalendarsResponse {
            back_disabled: navigation::is_back_disabled(&calendars, self.min_date),
            forward_disabled: navigation::is_forward_disabled(&calendars, self.max_date),
            offset: self.offset,
            calendars,
        }
    }

    fn back_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        interaction::back_props(calendars, step, self.offset, self.min_date)
    }

    fn forward_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        interaction::forward_props(calendars, step, self.offset, self.max_date)
    }

    fn navigate(&mut self, props: &NavigationProps) -> bool {
        let offset = &mut self.offset;
        props.on_click(|new_offset| *offset = new_offset)
    }

    /// Dismiss: the view snaps back to `date_in_view` with no pagination
    fn dismiss(&mut self, date_in_view: Option<NaiveDate>) {
        self.open = false;
        self.date_in_view = date_in_view;
        self.offset = 0;
    }
}

/// Picker holding at most one selected date
#[derive(Debug, Clone)]
pub struct SingleDatePicker {
    view: PickerView,
    disabled_dates: BTreeSet<NaiveDate>,
    selected: Option<NaiveDate>,
}

impl SingleDatePicker {
    pub fn new(config: DatePickerConfig, calendar: CalendarService) -> Self {
        Self {
            view: PickerView::new(config, calendar),
            disabled_dates: BTreeSet::new(),
            selected: None,
        }
    }

    pub fn with_bounds(mut self, min_date: Option<NaiveDate>, max_date: Option<NaiveDate>) -> Self {
        self.view.min_date = min_date;
        self.view.max_date = max_date;
        self
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.disabled_dates = dates.into_iter().collect();
        self
    }

    pub fn with_selected(mut self, date: Option<NaiveDate>) -> Self {
        self.selected = date;
        self.view.date_in_view = date;
        self
    }

    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.view.close_on_select = close_on_select;
        self
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn offset(&self) -> i32 {
        self.view.offset
    }

    pub fn is_open(&self) -> bool {
        self.view.open
    }

    pub fn open(&mut self) {
        self.view.open = true;
    }

    pub fn close(&mut self) {
        self.view.dismiss(self.selected);
    }

    pub fn calendars(&self) -> Vec<CalendarMonth> {
        let selection = self.selected.map_or(Selection::None, Selection::Single);
        self.view
            .calendar
            .build_calendars(&self.view.query(selection, &self.disabled_dates))
    }

    /// Calendars plus the navigation flags for the current view
    pub fn snapshot(&self) -> CalendarsResponse {
        self.view.response(self.calendars())
    }

    pub fn date_props(&self, date_obj: Option<&DateObj>) -> Result<DateProps, DatePickerError> {
        interaction::date_props(date_obj)
    }

    pub fn back_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        self.view.back_props(calendars, step)
    }

    pub fn forward_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        self.view.forward_props(calendars, step)
    }

    /// Apply a navigation click. Returns whether the offset changed hands.
    pub fn navigate(&mut self, props: &NavigationProps) -> bool {
        self.view.navigate(props)
    }

    /// Select a clicked day. Unselectable days are ignored.
    pub fn select(&mut self, date_obj: &DateObj) -> bool {
        if !date_obj.selectable {
            return false;
        }
        info!("🗓️ PICKER: Selected day {}", date_obj.date);
        self.selected = Some(date_obj.date);
        if self.view.close_on_select {
            self.view.open = false;
        }
        true
    }

    /// Update the selection from outside the grid, e.g. a typed value.
    /// Disabled dates are rejected.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        if self.disabled_dates.contains(&date) {
            info!("🗓️ PICKER: Ignoring disabled date {}", date);
            return false;
        }
        self.selected = Some(date);
        self.view.date_in_view = Some(date);
        true
    }
}

/// Picker holding a range of zero, one or two dates
#[derive(Debug, Clone)]
pub struct RangeDatePicker {
    view: PickerView,
    selected: Vec<NaiveDate>,
    hovered: Option<NaiveDate>,
}

impl RangeDatePicker {
    pub fn new(config: DatePickerConfig, calendar: CalendarService) -> Self {
        Self {
            view: PickerView::new(config, calendar),
            selected: Vec::new(),
            hovered: None,
        }
    }

    pub fn with_bounds(mut self, min_date: Option<NaiveDate>, max_date: Option<NaiveDate>) -> Self {
        self.view.min_date = min_date;
        self.view.max_date = max_date;
        self
    }

    /// Start from an existing selection; only the first two dates are kept
    pub fn with_selected(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.selected = dates.into_iter().take(2).collect();
        self.view.date_in_view = self.selected.first().copied();
        self
    }

    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.view.close_on_select = close_on_select;
        self
    }

    pub fn selected(&self) -> &[NaiveDate] {
        &self.selected
    }

    pub fn hovered(&self) -> Option<NaiveDate> {
        self.hovered
    }

    pub fn offset(&self) -> i32 {
        self.view.offset
    }

    pub fn is_open(&self) -> bool {
        self.view.open
    }

    pub fn open(&mut self) {
        self.view.open = true;
    }

    pub fn close(&mut self) {
        let first = self.selected.first().copied();
        self.view.dismiss(first);
    }

    pub fn calendars(&self) -> Vec<CalendarMonth> {
        let selection = Selection::Range(self.selected.clone());
        self.view
            .calendar
            .build_calendars(&self.view.query(selection, &BTreeSet::new()))
    }

    pub fn snapshot(&self) -> CalendarsResponse {
        self.view.response(self.calendars())
    }

    pub fn date_props(&self, date_obj: Option<&DateObj>) -> Result<DateProps, DatePickerError> {
        interaction::date_props(date_obj)
    }

    pub fn back_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        self.view.back_props(calendars, step)
    }

    pub fn forward_props(
        &self,
        calendars: Option<&[CalendarMonth]>,
        step: Option<u32>,
    ) -> Result<NavigationProps, DatePickerError> {
        self.view.forward_props(calendars, step)
    }

    pub fn navigate(&mut self, props: &NavigationProps) -> bool {
        self.view.navigate(props)
    }

    /// Grow or reset the range with a clicked day
    pub fn select(&mut self, date_obj: &DateObj) -> bool {
        let Some(next) = selection::next_range_selection(&self.selected, date_obj) else {
            return false;
        };
        let completes_range = self.selected.len() == 1 && next.len() == 2;
        info!("🗓️ PICKER: Range selection {:?}", next);
        self.selected = next;

        if completes_range && self.view.close_on_select {
            self.view.open = false;
        }
        true
    }

    /// Preview the range up to `date`; ignored until an anchor exists
    pub fn hover(&mut self, date: NaiveDate) {
        if !self.selected.is_empty() {
            self.hovered = Some(date);
        }
    }

    /// Pointer left the calendar
    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        selection::is_in_range(&self.selected, self.hovered, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interaction::YEAR_STEP;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn service() -> CalendarService {
        CalendarService::with_today(date(2024, 3, 15))
    }

    fn find(calendars: &[CalendarMonth], target: NaiveDate) -> DateObj {
        *calendars
            .iter()
            .flat_map(|calendar| calendar.month_days())
            .find(|day| day.date == target)
            .unwrap()
    }

    #[test]
    fn test_single_picker_select_and_close() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service());
        picker.open();

        let calendars = picker.calendars();
        let cell = find(&calendars, date(2024, 3, 20));
        let props = picker.date_props(Some(&cell)).unwrap();
        assert!(props.on_click(|date_obj| {
            picker.select(date_obj);
        }));

        assert_eq!(picker.selected(), Some(date(2024, 3, 20)));
        assert!(!picker.is_open());
        assert!(picker.calendars()[0].days().any(|day| day.selected && day.date == date(2024, 3, 20)));
    }

    #[test]
    fn test_single_picker_keeps_open_without_close_on_select() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service())
            .with_close_on_select(false);
        picker.open();
        let cell = find(&picker.calendars(), date(2024, 3, 2));
        assert!(picker.select(&cell));
        assert!(picker.is_open());
    }

    #[test]
    fn test_single_picker_ignores_unselectable_day() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service())
            .with_bounds(Some(date(2024, 3, 10)), None);
        let cell = find(&picker.calendars(), date(2024, 3, 5));
        assert!(!cell.selectable);
        assert!(!picker.select(&cell));
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_single_picker_disabled_dates() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service())
            .with_disabled_dates([date(2024, 3, 8)]);
        assert!(!find(&picker.calendars(), date(2024, 3, 8)).selectable);
        assert!(!picker.set_date(date(2024, 3, 8)));
        assert!(picker.set_date(date(2024, 7, 4)));
        assert_eq!(picker.calendars()[0].start, date(2024, 7, 1));
    }

    #[test]
    fn test_single_picker_navigation_and_close_reset() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service())
            .with_selected(Some(date(2024, 5, 2)));
        picker.open();

        let calendars = picker.calendars();
        assert_eq!(calendars[0].start, date(2024, 5, 1));
        let props = picker.forward_props(Some(&calendars), Some(YEAR_STEP)).unwrap();
        assert!(picker.navigate(&props));
        assert_eq!(picker.offset(), 12);
        assert_eq!(picker.calendars()[0].start, date(2025, 5, 1));

        picker.close();
        assert_eq!(picker.offset(), 0);
        assert!(!picker.is_open());
        assert_eq!(picker.calendars()[0].start, date(2024, 5, 1));
    }

    #[test]
    fn test_single_picker_back_navigation_blocked_at_min() {
        let mut picker = SingleDatePicker::new(DatePickerConfig::default(), service())
            .with_bounds(Some(date(2024, 2, 1)), None);

        let calendars = picker.calendars();
        let props = picker.back_props(Some(&calendars), None).unwrap();
        assert!(!props.disabled);
        assert!(picker.navigate(&props));
        assert_eq!(picker.offset(), -1);

        let calendars = picker.calendars();
        assert_eq!(calendars[0].start, date(2024, 2, 1));
        let props = picker.back_props(Some(&calendars), None).unwrap();
        assert!(props.disabled);
        assert!(!picker.navigate(&props));
        assert_eq!(picker.offset(), -1);
        assert!(picker.snapshot().back_disabled);
    }

    #[test]
    fn test_range_picker_defaults_to_two_months() {
        let picker = RangeDatePicker::new(DatePickerConfig::range(), service());
        let snapshot = picker.snapshot();
        assert_eq!(snapshot.calendars.len(), 2);
        assert_eq!(snapshot.calendars[0].start, date(2024, 3, 1));
        assert_eq!(snapshot.calendars[1].start, date(2024, 4, 1));
        assert!(!snapshot.back_disabled);
    }

    #[test]
    fn test_range_picker_selection_flow() {
        let mut picker = RangeDatePicker::new(DatePickerConfig::range(), service());
        picker.open();

        let calendars = picker.calendars();
        assert!(picker.select(&find(&calendars, date(2024, 3, 20))));
        assert!(picker.is_open());

        // Earlier second click becomes the start of the range
        assert!(picker.select(&find(&calendars, date(2024, 3, 12))));
        assert_eq!(picker.selected(), &[date(2024, 3, 12), date(2024, 3, 20)]);
        assert!(!picker.is_open());
        assert!(picker.is_in_range(date(2024, 3, 15)));

        // A third click starts over
        assert!(picker.select(&find(&calendars, date(2024, 4, 2))));
        assert_eq!(picker.selected(), &[date(2024, 4, 2)]);
    }

    #[test]
    fn test_range_picker_hover_preview() {
        let mut picker = RangeDatePicker::new(DatePickerConfig::range(), service());

        picker.hover(date(2024, 3, 5));
        assert_eq!(picker.hovered(), None);

        let calendars = picker.calendars();
        picker.select(&find(&calendars, date(2024, 3, 10)));
        picker.hover(date(2024, 3, 5));
        assert!(picker.is_in_range(date(2024, 3, 7)));
        assert!(!picker.is_in_range(date(2024, 3, 12)));

        picker.leave();
        assert!(!picker.is_in_range(date(2024, 3, 7)));
    }

    #[test]
    fn test_range_picker_close_returns_to_first_selected() {
        let mut picker = RangeDatePicker::new(DatePickerConfig::range(), service())
            .with_selected([date(2024, 8, 3), date(2024, 8, 9), date(2024, 8, 30)]);
        assert_eq!(picker.selected().len(), 2);

        let calendars = picker.calendars();
        let props = picker.back_props(Some(&calendars), Some(YEAR_STEP)).unwrap();
        picker.navigate(&props);
        assert_eq!(picker.calendars()[0].start, date(2023, 8, 1));

        picker.close();
        assert_eq!(picker.calendars()[0].start, date(2024, 8, 1));
    }

    #[test]
    fn test_range_picker_highlights_selected_endpoints() {
        let picker = RangeDatePicker::new(DatePickerConfig::range(), service())
            .with_selected([date(2024, 3, 30), date(2024, 4, 2)]);
        let calendars = picker.calendars();
        assert!(find(&calendars, date(2024, 3, 30)).selected);
        assert!(find(&calendars, date(2024, 4, 2)).selected);
        assert!(!find(&calendars, date(2024, 4, 1)).selected);
        assert!(picker.is_in_range(date(2024, 4, 1)));
    }
}
