//! Interaction props for day cells and month navigation controls.
//!
//! The UI layer asks for props per rendered element and wires the returned
//! click handlers to its own events. Caller-supplied handlers run first and
//! can consume the event before the built-in behaviour runs.

use chrono::NaiveDate;
use shared::{CalendarMonth, DateObj, NavigationDirection};
use tracing::debug;

use super::errors::{required, DatePickerError};
use super::navigation;

/// Step of a plain previous/next month control
pub const MONTH_STEP: u32 = 1;
/// Step of a "jump a year" control
pub const YEAR_STEP: u32 = 12;

/// Whether an event handler let the event continue down the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Ordered event handlers; dispatch stops at the first one returning `Stop`.
pub struct HandlerChain<'a, E> {
    handlers: Vec<Box<dyn FnMut(&E) -> Propagation + 'a>>,
}

impl<'a, E> HandlerChain<'a, E> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn then(mut self, handler: impl FnMut(&E) -> Propagation + 'a) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns true when some handler consumed the event
    pub fn dispatch(&mut self, event: &E) -> bool {
        self.handlers
            .iter_mut()
            .any(|handler| handler(event) == Propagation::Stop)
    }
}

impl<'a, E> Default for HandlerChain<'a, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Props for one day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateProps {
    pub date_obj: DateObj,
    pub disabled: bool,
    pub pressed: bool,
}

impl DateProps {
    /// Forward the cell to `on_date_selected` unless it is not selectable.
    /// Returns whether the callback ran.
    pub fn on_click(&self, on_date_selected: impl FnOnce(&DateObj)) -> bool {
        self.on_click_after(&mut HandlerChain::new(), on_date_selected)
    }

    /// Like `on_click`, but lets `handlers` see the cell first and consume it
    pub fn on_click_after(
        &self,
        handlers: &mut HandlerChain<'_, DateObj>,
        on_date_selected: impl FnOnce(&DateObj),
    ) -> bool {
        if handlers.dispatch(&self.date_obj) {
            debug!("Click on {} consumed by caller handler", self.date_obj.date);
            return false;
        }
        if !self.date_obj.selectable {
            return false;
        }
        on_date_selected(&self.date_obj);
        true
    }
}

/// Props for one navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationProps {
    pub direction: NavigationDirection,
    /// Requested step in months
    pub step: u32,
    pub disabled: bool,
    /// Cumulative offset a click reports, after clamping
    pub new_offset: i32,
}

impl NavigationProps {
    /// Report the new offset unless the control is disabled.
    /// Returns whether the callback ran.
    pub fn on_click(&self, on_offset_changed: impl FnOnce(i32)) -> bool {
        self.on_click_after(&mut HandlerChain::new(), on_offset_changed)
    }

    pub fn on_click_after(
        &self,
        handlers: &mut HandlerChain<'_, NavigationProps>,
        on_offset_changed: impl FnOnce(i32),
    ) -> bool {
        if handlers.dispatch(self) || self.disabled {
            return false;
        }
        on_offset_changed(self.new_offset);
        true
    }
}

/// Props for a day cell. The cell is required.
pub fn date_props(date_obj: Option<&DateObj>) -> Result<DateProps, DatePickerError> {
    let date_obj = *required(date_obj, "date_props", "date_obj")?;
    Ok(DateProps {
        date_obj,
        disabled: !date_obj.selectable,
        pressed: date_obj.selected,
    })
}

/// Props for a backward control. `step` defaults to one month.
pub fn back_props(
    calendars: Option<&[CalendarMonth]>,
    step: Option<u32>,
    current_offset: i32,
    min_date: Option<NaiveDate>,
) -> Result<NavigationProps, DatePickerError> {
    let calendars = required(calendars, "back_props", "calendars")?;
    Ok(build_navigation_props(
        NavigationDirection::Back,
        calendars,
        step.unwrap_or(MONTH_STEP),
        current_offset,
        min_date,
        None,
    ))
}

/// Props for a forward control. `step` defaults to one month.
pub fn forward_props(
    calendars: Option<&[CalendarMonth]>,
    step: Option<u32>,
    current_offset: i32,
    max_date: Option<NaiveDate>,
) -> Result<NavigationProps, DatePickerError> {
    let calendars = required(calendars, "forward_props", "calendars")?;
    Ok(build_navigation_props(
        NavigationDirection::Forward,
        calendars,
        step.unwrap_or(MONTH_STEP),
        current_offset,
        None,
        max_date,
    ))
}

fn build_navigation_props(
    direction: NavigationDirection,
    calendars: &[CalendarMonth],
    step: u32,
    current_offset: i32,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
) -> NavigationProps {
    NavigationProps {
        direction,
        step,
        disabled: navigation::is_disabled(direction, calendars, min_date, max_date),
        new_offset: navigation::next_offset(direction, current_offset, calendars, step, min_date, max_date),
    }
}
