//! Command-line argument parsing using clap.
//!
//! Positional arguments follow the cal convention: `[month] [year]`.

use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::{Datelike, Locale, NaiveDate};
use clap::{Parser, ValueHint};

use crate::navigation::today_for;
use crate::overflow::DEFAULT_OVERFLOW_CAP;
use crate::types::{COLOR_ENABLED_BY_DEFAULT, ColumnsMode, ViewContext, ViewerZone};
use crate::view::system_locale;

#[derive(Parser, Debug)]
#[command(name = "club-cal")]
#[command(about = "Displays a month of club trainings and matches", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// JSON file with the events to display.
    #[arg(
        short = 'e',
        long,
        help_heading = "Event options",
        value_name = "file",
        value_hint = ValueHint::FilePath
    )]
    pub events: Option<PathBuf>,

    /// Maximum number of events shown per day.
    #[arg(long, default_value_t = DEFAULT_OVERFLOW_CAP, help_heading = "Event options", value_name = "num")]
    pub cap: usize,

    /// Time zone events are shown in (local, utc or +HH:MM).
    #[arg(long, default_value = "local", help_heading = "Event options", value_name = "zone")]
    pub tz: ViewerZone,

    /// Open the event with this id (prints its details route).
    #[arg(long, help_heading = "Event options", value_name = "id")]
    pub open: Option<String>,

    /// Number of consecutive months to display.
    #[arg(
        short = 'n',
        long = "months",
        help_heading = "Display options",
        value_name = "num"
    )]
    pub months_count: Option<u32>,

    /// Go back this many months before displaying.
    #[arg(long, help_heading = "Navigation", value_name = "num")]
    pub prev: Option<u32>,

    /// Go forward this many months before displaying.
    #[arg(long, help_heading = "Navigation", value_name = "num")]
    pub next: Option<u32>,

    /// Jump to the current month (applied after --prev/--next).
    #[arg(short = 't', long, help_heading = "Navigation")]
    pub today: bool,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 1, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,

    /// Day cell width in characters (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "width",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Locale for month and weekday names (e.g. ru_RU).
    #[arg(long, help_heading = "Output options", value_name = "locale")]
    pub locale: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a month of trainings and matches.

Without any arguments, display the current month with no events.

Examples:
  club-cal -e events.json             Current month
  club-cal -e events.json 2 2026      February 2026
  club-cal -e events.json --next 1    Next month
  club-cal -e events.json -n 3        Three consecutive months
  club-cal -e events.json --open t1   Details route of event t1
  club-cal --tz utc --cap 3           Show up to 3 events per day in UTC";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl ViewContext {
    pub fn new(args: &Args) -> Result<Self, String> {
        let today = today_for(args.tz);

        let color = !args.color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => {
                let n = s
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid width value: {}", s))?;
                if n == 0 {
                    return Err("Width must be positive".to_string());
                }
                ColumnsMode::Fixed(n)
            }
        };

        if args.months_count == Some(0) {
            return Err("Number of months must be positive".to_string());
        }

        let locale = match args.locale.as_deref() {
            Some(s) => s
                .parse::<Locale>()
                .map_err(|_| format!("Invalid locale: {}", s))?,
            None => system_locale(),
        };

        Ok(ViewContext {
            cap: args.cap,
            color,
            columns,
            today,
            zone: args.tz,
            locale,
        })
    }
}

/// Calculate the zero-based display month from positional arguments.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: year (4 digits) or month (1-2 digits or name)
/// - 2 args: month year
pub fn get_display_month(args: &Args, today: NaiveDate) -> Result<(i32, u32), String> {
    match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, None) => Ok((today.year(), today.month0())),
        (Some(val), None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return Ok((num, today.month0()));
            }
            parse_month(val)
                .map(|month| (today.year(), month - 1))
                .ok_or_else(|| format!("Invalid argument: {}", val))
        }
        (Some(month), Some(year)) => {
            let month = parse_month(month).ok_or_else(|| format!("Invalid month: {}", month))?;
            Ok((parse_year(year)?, month - 1))
        }
        (None, Some(_)) => Err("Invalid argument combination".to_string()),
    }
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year = s
        .parse::<i32>()
        .map_err(|_| format!("Invalid year: {}", s))?;
    if !(1..=9999).contains(&year) {
        return Err(format!("Invalid year: {} (must be 1-9999)", year));
    }
    Ok(year)
}

/// Parse a one-based month from a number (1-12) or an English name.
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let s_lower = s.to_lowercase();
    NAMES
        .iter()
        .position(|name| *name == s_lower || (s_lower.len() == 3 && name.starts_with(&s_lower)))
        .map(|idx| idx as u32 + 1)
}
