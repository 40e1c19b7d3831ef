//! Per-day selection classification.
//!
//! Decides whether a day is selected, selectable and inside the highlighted
//! range, and owns the range-picker click policy so every caller grows a
//! range the same way.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared::{DateObj, Selection};
use tracing::debug;

/// True when any selected date falls on the same calendar day
pub fn is_selected(selection: &Selection, date: NaiveDate) -> bool {
    selection.dates().iter().any(|selected| *selected == date)
}

/// Inclusive bounds check. Missing bounds never restrict.
pub fn is_selectable(min_date: Option<NaiveDate>, max_date: Option<NaiveDate>, date: NaiveDate) -> bool {
    let before_min = min_date.is_some_and(|min| date < min);
    let after_max = max_date.is_some_and(|max| date > max);
    !before_min && !after_max
}

/// Bounds check plus an explicit set of disabled days
pub fn is_selectable_with(
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    disabled_dates: &BTreeSet<NaiveDate>,
    date: NaiveDate,
) -> bool {
    is_selectable(min_date, max_date, date) && !disabled_dates.contains(&date)
}

/// Range highlight for a day.
///
/// With a closed range the endpoints themselves are not "in range", they are
/// reported through `selected`. With only an anchor, the span between the
/// anchor and the hovered day is previewed in either direction; the hovered
/// day is included, the anchor is not.
pub fn is_in_range(selected: &[NaiveDate], hovered: Option<NaiveDate>, date: NaiveDate) -> bool {
    match selected {
        [] => false,
        [anchor] => hovered.is_some_and(|hovered| {
            (*anchor < date && hovered >= date) || (date < *anchor && date >= hovered)
        }),
        [first, second, ..] => *first < date && *second > date,
    }
}

/// Range picker click policy.
///
/// Returns the new selection, or `None` when the click must be ignored
/// because the day is not selectable.
pub fn next_range_selection(current: &[NaiveDate], clicked: &DateObj) -> Option<Vec<NaiveDate>> {
    if !clicked.selectable {
        debug!("Ignoring click on unselectable day {}", clicked.date);
        return None;
    }

    let date = clicked.date;
    let next = match current {
        [] => vec![date],
        [anchor] if *anchor < date => vec![*anchor, date],
        [anchor] => vec![date, *anchor],
        _ => vec![date],
    };

    debug!("Range selection {:?} -> {:?}", current, next);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn clicked(date: NaiveDate, selectable: bool) -> DateObj {
        DateObj {
            date,
            selected: false,
            selectable,
            today: false,
            prev_month: false,
            next_month: false,
        }
    }

    #[test]
    fn test_is_selected() {
        let single = Selection::Single(date(2024, 1, 10));
        assert!(is_selected(&single, date(2024, 1, 10)));
        assert!(!is_selected(&single, date(2024, 1, 11)));

        let range = Selection::Range(vec![date(2024, 1, 10), date(2024, 1, 20)]);
        assert!(is_selected(&range, date(2024, 1, 20)));
        assert!(!is_selected(&range, date(2024, 1, 15)));

        assert!(!is_selected(&Selection::None, date(2024, 1, 10)));
    }

    #[test]
    fn test_is_selectable_inclusive_bounds() {
        let min = Some(date(2024, 1, 5));
        let max = Some(date(2024, 1, 25));

        assert!(!is_selectable(min, max, date(2024, 1, 4)));
        assert!(is_selectable(min, max, date(2024, 1, 5)));
        assert!(is_selectable(min, max, date(2024, 1, 25)));
        assert!(!is_selectable(min, max, date(2024, 1, 26)));
        assert!(is_selectable(None, None, date(1900, 1, 1)));
    }

    #[test]
    fn test_is_selectable_monotonic_when_widening() {
        let narrow = (Some(date(2024, 1, 10)), Some(date(2024, 1, 20)));
        let wide = (Some(date(2023, 12, 1)), Some(date(2024, 2, 28)));

        let mut day = date(2023, 11, 1);
        while day < date(2024, 4, 1) {
            if is_selectable(narrow.0, narrow.1, day) {
                assert!(is_selectable(wide.0, wide.1, day), "{} lost selectability", day);
                assert!(is_selectable(None, wide.1, day));
                assert!(is_selectable(wide.0, None, day));
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_disabled_dates_are_not_selectable() {
        let disabled: BTreeSet<NaiveDate> = [date(2024, 1, 12)].into_iter().collect();
        assert!(!is_selectable_with(None, None, &disabled, date(2024, 1, 12)));
        assert!(is_selectable_with(None, None, &disabled, date(2024, 1, 13)));
        assert!(!is_selectable_with(Some(date(2024, 1, 14)), None, &disabled, date(2024, 1, 13)));
    }

    #[test]
    fn test_closed_range_classification() {
        let selected = [date(2024, 1, 10), date(2024, 1, 20)];

        assert!(is_in_range(&selected, None, date(2024, 1, 15)));
        assert!(!is_in_range(&selected, None, date(2024, 1, 10)));
        assert!(!is_in_range(&selected, None, date(2024, 1, 20)));
        assert!(!is_in_range(&selected, None, date(2024, 1, 25)));
        // Hover is ignored once the range is closed
        assert!(!is_in_range(&selected, Some(date(2024, 1, 30)), date(2024, 1, 25)));
    }

    #[test]
    fn test_anchor_hover_preview() {
        let selected = [date(2024, 1, 10)];

        // Hovering backward before the anchor
        let hovered = Some(date(2024, 1, 5));
        assert!(is_in_range(&selected, hovered, date(2024, 1, 7)));
        assert!(is_in_range(&selected, hovered, date(2024, 1, 5)));
        assert!(!is_in_range(&selected, hovered, date(2024, 1, 10)));
        assert!(!is_in_range(&selected, hovered, date(2024, 1, 12)));
        assert!(!is_in_range(&selected, hovered, date(2024, 1, 4)));

        // Hovering forward after the anchor
        let hovered = Some(date(2024, 1, 14));
        assert!(is_in_range(&selected, hovered, date(2024, 1, 12)));
        assert!(is_in_range(&selected, hovered, date(2024, 1, 14)));
        assert!(!is_in_range(&selected, hovered, date(2024, 1, 15)));

        assert!(!is_in_range(&selected, None, date(2024, 1, 12)));
    }

    #[test]
    fn test_empty_selection_never_in_range() {
        assert!(!is_in_range(&[], Some(date(2024, 1, 5)), date(2024, 1, 5)));
    }

    #[test]
    fn test_range_policy_growth() {
        let first = next_range_selection(&[], &clicked(date(2024, 1, 10), true)).unwrap();
        assert_eq!(first, vec![date(2024, 1, 10)]);

        let after = next_range_selection(&first, &clicked(date(2024, 1, 20), true)).unwrap();
        assert_eq!(after, vec![date(2024, 1, 10), date(2024, 1, 20)]);

        let before = next_range_selection(&first, &clicked(date(2024, 1, 3), true)).unwrap();
        assert_eq!(before, vec![date(2024, 1, 3), date(2024, 1, 10)]);
    }

    #[test]
    fn test_range_policy_resets_closed_range() {
        let closed = [date(2024, 1, 10), date(2024, 1, 20)];
        let next = next_range_selection(&closed, &clicked(date(2024, 2, 1), true)).unwrap();
        assert_eq!(next, vec![date(2024, 2, 1)]);
    }

    #[test]
    fn test_range_policy_ignores_unselectable() {
        assert_eq!(next_range_selection(&[], &clicked(date(2024, 1, 10), false)), None);
    }
}
