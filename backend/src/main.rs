use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueEnum};
use datepicker_backend::config::ConfigService;
use datepicker_backend::domain::{navigation, CalendarService, CalendarsQuery};
use shared::{CalendarMonth, CalendarsResponse, DatePickerConfig, DayCell, Selection};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One selected date, one month by default
    Single,
    /// Up to two selected dates, two months by default
    Range,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    /// Calendars and navigation flags as JSON
    Json,
    /// Month grids as plain text
    Text,
}

#[derive(Parser)]
#[command(name = "datepicker")]
#[command(about = "Build date picker month grids", long_about = None)]
struct Cli {
    /// Picker flavour, which also picks the config defaults
    #[arg(short, long, value_enum, default_value = "single")]
    mode: Mode,

    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD); today when omitted
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Months paginated away from the reference date
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,

    /// Number of months to build
    #[arg(long)]
    months: Option<usize>,

    /// 0 = Sunday ... 6 = Saturday
    #[arg(long)]
    first_day_of_week: Option<u8>,

    /// Fill leading and trailing cells with neighbouring-month days
    #[arg(long)]
    show_outside_days: bool,

    #[arg(long)]
    min: Option<NaiveDate>,

    #[arg(long)]
    max: Option<NaiveDate>,

    /// Selected date; repeat for a range
    #[arg(short, long)]
    select: Vec<NaiveDate>,

    /// Date that cannot be picked; repeatable
    #[arg(long)]
    disable: Vec<NaiveDate>,

    #[arg(long, value_enum, default_value = "json")]
    output: Output,

    /// Set log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(short = 'L', long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let service = CalendarService::new();
    let query = build_query(&cli, &config);
    let calendars = service.build_calendars(&query);

    let response = CalendarsResponse {
        back_disabled: navigation::is_back_disabled(&calendars, query.grid.min_date),
        forward_disabled: navigation::is_forward_disabled(&calendars, query.grid.max_date),
        offset: query.offset,
        calendars,
    };
    info!(
        "Built {} calendar(s); back disabled: {}, forward disabled: {}",
        response.calendars.len(),
        response.back_disabled,
        response.forward_disabled
    );

    match cli.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        Output::Text => {
            for calendar in &response.calendars {
                println!("{}", render_month(&service, calendar, &config));
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<DatePickerConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigService::load_config(path)?,
        None => match cli.mode {
            Mode::Single => DatePickerConfig::default(),
            Mode::Range => DatePickerConfig::range(),
        },
    };

    if let Some(months) = cli.months {
        config.months_to_display = months;
    }
    if let Some(first_day_of_week) = cli.first_day_of_week {
        config.first_day_of_week = first_day_of_week;
    }
    if cli.show_outside_days {
        config.show_outside_days = true;
    }
    Ok(config.normalized())
}

fn build_query(cli: &Cli, config: &DatePickerConfig) -> CalendarsQuery {
    let selection = match cli.mode {
        Mode::Single => cli.select.last().copied().map_or(Selection::None, Selection::Single),
        Mode::Range => {
            let mut dates: Vec<NaiveDate> = cli.select.iter().copied().take(2).collect();
            dates.sort();
            Selection::Range(dates)
        }
    };

    let mut query = CalendarsQuery::from_config(config);
    query.date = cli.date;
    query.offset = cli.offset;
    query.grid.selection = selection;
    query.grid.min_date = cli.min;
    query.grid.max_date = cli.max;
    query.grid.disabled_dates = cli.disable.iter().copied().collect();
    query
}

fn render_month(service: &CalendarService, calendar: &CalendarMonth, config: &DatePickerConfig) -> String {
    let mut lines = vec![service.month_heading(calendar, &config.month_names)];
    lines.push(
        service
            .weekday_labels(config.first_day_of_week, &config.day_names)
            .iter()
            .map(|label| format!("{:>4}", label))
            .collect(),
    );

    for week in &calendar.weeks {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                DayCell::Empty => "    ".to_string(),
                DayCell::Filled(day) => {
                    let marker = if day.selected {
                        '*'
                    } else if !day.selectable {
                        'x'
                    } else if day.today {
                        '!'
                    } else {
                        ' '
                    };
                    format!("{:>3}{}", day.date.day(), marker)
                }
            })
            .collect();
        lines.push(row);
    }
    lines.join("\n")
}
