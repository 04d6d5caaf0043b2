//! Month grid calculation using Zeller's congruence (proleptic Gregorian).
//!
//! Months are zero-based throughout (0 = January, 11 = December).

use chrono::{Datelike, NaiveDate, Weekday};

use crate::navigation::{is_current_month, normalize};
use crate::types::{DAYS_PER_WEEK, DayCell, MonthGrid};

/// Check if a year is a leap year: divisible by 4, except centuries unless divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => days_in_month_normalized(year, month),
    }
}

fn days_in_month_normalized(year: i32, month: u32) -> u32 {
    let (year, month) = normalize(year, i64::from(month));
    days_in_month(year, month)
}

/// Calculate the weekday of day 1 using Zeller's congruence.
///
/// Floor division keeps the formula valid for years <= 0.
pub fn first_day_of_month(year: i32, month: u32) -> Weekday {
    let (year, month) = normalize(year, i64::from(month));
    let month = i64::from(month) + 1;
    let m = if month < 3 { month + 12 } else { month };
    let y = if month < 3 {
        i64::from(year) - 1
    } else {
        i64::from(year)
    };
    let q: i64 = 1;
    let k = y.rem_euclid(100);
    let j = y.div_euclid(100);

    let h = (q + (13 * (m + 1)) / 5 + k + k / 4 + j.div_euclid(4) - 2 * j).rem_euclid(7);
    // h: 0=Sat, 1=Sun, 2=Mon, 3=Tue, 4=Wed, 5=Thu, 6=Fri
    match h {
        0 => Weekday::Sat,
        1 => Weekday::Sun,
        2 => Weekday::Mon,
        3 => Weekday::Tue,
        4 => Weekday::Wed,
        5 => Weekday::Thu,
        _ => Weekday::Fri,
    }
}

/// Number of empty cells before day 1 in a Monday-first layout.
pub fn first_weekday_offset(year: i32, month: u32) -> usize {
    first_day_of_month(year, month).num_days_from_monday() as usize
}

/// Saturday and Sunday occupy the last two columns.
pub fn is_weekend_column(column: usize) -> bool {
    column % DAYS_PER_WEEK >= 5
}

/// Build the grid for a month. Out-of-range months are carried into the year.
pub fn build_grid(year: i32, month: u32, today: NaiveDate) -> MonthGrid {
    let (year, month) = normalize(year, i64::from(month));
    let days_in_month = days_in_month(year, month);
    let first_day = first_day_of_month(year, month);
    let offset = first_day.num_days_from_monday() as usize;

    let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(offset + days_in_month as usize);

    // Empty cells before first day
    cells.resize(offset, None);

    let today_in_month = is_current_month(year, month, today);
    let mut weekday = first_day;
    for day in 1..=days_in_month {
        let column = cells.len() % DAYS_PER_WEEK;
        cells.push(Some(DayCell {
            day,
            weekday,
            is_today: today_in_month && today.day() == day,
            is_weekend: is_weekend_column(column),
        }));
        weekday = weekday.succ();
    }

    MonthGrid { year, month, cells }
}

impl MonthGrid {
    /// Rows of up to seven cells; the last row may be short.
    pub fn weeks(&self) -> std::slice::Chunks<'_, Option<DayCell>> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().flatten()
    }

    pub fn week_count(&self) -> usize {
        self.cells.len().div_ceil(DAYS_PER_WEEK)
    }
}
