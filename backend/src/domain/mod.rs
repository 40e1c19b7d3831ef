//! # Date Picker Domain
//!
//! Headless date picker logic: month grid construction, selection rules,
//! navigation limits and the props handed to a UI layer. Nothing here
//! renders; the UI asks for calendars and props and wires the returned
//! handlers to its own events.

pub mod calendar;
pub mod commands;
pub mod date_value;
pub mod errors;
pub mod interaction;
pub mod navigation;
pub mod picker;
pub mod selection;

// Re-export commonly used types
pub use calendar::CalendarService;
pub use commands::calendar::{CalendarsQuery, GridOptions};
pub use date_value::DateValue;
pub use errors::DatePickerError;
pub use interaction::{DateProps, HandlerChain, NavigationProps, Propagation};
pub use picker::{RangeDatePicker, SingleDatePicker};
