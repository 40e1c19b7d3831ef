//! Domain-level query types.
//! These structs bundle the inputs of the calendar services so call sites
//! name what they pass instead of threading long positional argument lists.

pub mod calendar {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use shared::{DatePickerConfig, Selection};

    /// Inputs shared by every month grid in one build.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct GridOptions {
        pub selection: Selection,
        pub min_date: Option<NaiveDate>,
        pub max_date: Option<NaiveDate>,
        /// Days that cannot be picked even inside the bounds
        pub disabled_dates: BTreeSet<NaiveDate>,
        /// 0 = Sunday ... 6 = Saturday, reduced modulo 7
        pub first_day_of_week: u8,
        pub show_outside_days: bool,
    }

    impl GridOptions {
        pub fn from_config(config: &DatePickerConfig) -> Self {
            Self {
                first_day_of_week: config.first_day_of_week,
                show_outside_days: config.show_outside_days,
                ..Self::default()
            }
        }
    }

    /// Query for a run of consecutive month grids.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CalendarsQuery {
        /// Reference date; today when absent
        pub date: Option<NaiveDate>,
        pub months_to_display: usize,
        /// Months paginated away from the reference date
        pub offset: i32,
        pub grid: GridOptions,
    }

    impl Default for CalendarsQuery {
        fn default() -> Self {
            Self {
                date: None,
                months_to_display: 1,
                offset: 0,
                grid: GridOptions::default(),
            }
        }
    }

    impl CalendarsQuery {
        pub fn from_config(config: &DatePickerConfig) -> Self {
            Self {
                months_to_display: config.months_to_display,
                grid: GridOptions::from_config(config),
                ..Self::default()
            }
        }
    }
}
