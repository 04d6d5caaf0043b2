//! View model and callback surface for a rendered month.
//!
//! A `MonthView` is rebuilt from scratch for every `(year, month, events)`
//! triple. User interaction flows back to the caller through `CalendarHost`.

use chrono::{Locale, NaiveDate, TimeZone, Weekday};

use crate::bucket::bucket_events;
use crate::calendar::build_grid;
use crate::navigation::{is_current_month, jump_to_today, next_month, prev_month};
use crate::overflow::{Overflow, apply_overflow};
use crate::types::{CalendarEvent, DayCell, ViewerZone};

/// One populated day with its sorted events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView<'a> {
    pub cell: DayCell,
    /// Full sorted bucket; use `overflow()` for what is displayed.
    pub events: Vec<&'a CalendarEvent>,
    cap: usize,
}

impl<'a> DayView<'a> {
    pub fn overflow(&self) -> Overflow<'_, 'a> {
        apply_overflow(&self.events, self.cap)
    }
}

/// Everything a renderer needs for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month: u32,
    pub cap: usize,
    /// Leading `None`s followed by one entry per day, Monday-first.
    pub days: Vec<Option<DayView<'a>>>,
    /// The "jump to today" affordance exists only away from the current month.
    pub show_today: bool,
}

impl<'a> MonthView<'a> {
    pub fn build<Tz: TimeZone>(
        year: i32,
        month: u32,
        events: &'a [CalendarEvent],
        today: NaiveDate,
        tz: &Tz,
        cap: usize,
    ) -> Self {
        let grid = build_grid(year, month, today);
        let mut buckets = bucket_events(events, grid.year, grid.month, tz);

        let days = grid
            .cells
            .iter()
            .copied()
            .map(|cell| {
                cell.map(|cell| DayView {
                    cell,
                    events: buckets.remove(&cell.day).unwrap_or_default(),
                    cap,
                })
            })
            .collect();

        MonthView {
            year: grid.year,
            month: grid.month,
            cap,
            days,
            show_today: !is_current_month(grid.year, grid.month, today),
        }
    }

    /// Build with the zone chosen at runtime.
    pub fn build_in_zone(
        year: i32,
        month: u32,
        events: &'a [CalendarEvent],
        today: NaiveDate,
        zone: ViewerZone,
        cap: usize,
    ) -> Self {
        match zone {
            ViewerZone::Local => Self::build(year, month, events, today, &chrono::Local, cap),
            ViewerZone::Utc => Self::build(year, month, events, today, &chrono::Utc, cap),
            ViewerZone::Fixed(offset) => Self::build(year, month, events, today, &offset, cap),
        }
    }

    pub fn day(&self, day: u32) -> Option<&DayView<'a>> {
        self.days.iter().flatten().find(|d| d.cell.day == day)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, Option<DayView<'a>>> {
        self.days.chunks(crate::types::DAYS_PER_WEEK)
    }

    /// All events of the month in day order.
    pub fn events(&self) -> impl Iterator<Item = &'a CalendarEvent> + '_ {
        self.days.iter().flatten().flat_map(|d| d.events.iter().copied())
    }

    /// Route a user action to the host. Returns whether a callback fired.
    ///
    /// `Today` is ignored while the current month is displayed, and an
    /// `EventClick` for an id not in this month is ignored.
    pub fn dispatch<H: CalendarHost + ?Sized>(&self, action: &ViewAction, host: &mut H) -> bool {
        match action {
            ViewAction::EventClick(id) => match self.events().find(|e| &e.id == id) {
                Some(event) => {
                    host.on_event_click(event);
                    true
                }
                None => false,
            },
            ViewAction::PrevMonth => {
                host.on_prev_month();
                true
            }
            ViewAction::NextMonth => {
                host.on_next_month();
                true
            }
            ViewAction::Today if self.show_today => {
                host.on_today();
                true
            }
            ViewAction::Today => false,
        }
    }
}

/// User interaction raised by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    EventClick(String),
    PrevMonth,
    NextMonth,
    Today,
}

/// Callbacks the surrounding page implements.
pub trait CalendarHost {
    fn on_event_click(&mut self, event: &CalendarEvent);
    fn on_prev_month(&mut self);
    fn on_next_month(&mut self);
    fn on_today(&mut self);
}

/// Host that keeps the displayed month and remembers the last opened event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
    /// The event passed to the last click callback.
    pub opened: Option<CalendarEvent>,
}

impl Navigator {
    pub fn new(year: i32, month: u32, today: NaiveDate) -> Self {
        Navigator {
            year,
            month,
            today,
            opened: None,
        }
    }

    /// Details route for the last opened event, keyed by kind and id.
    pub fn opened_route(&self) -> Option<String> {
        self.opened
            .as_ref()
            .map(|event| format!("/{}/{}", event.kind, event.id))
    }
}

impl CalendarHost for Navigator {
    fn on_event_click(&mut self, event: &CalendarEvent) {
        self.opened = Some(event.clone());
    }

    fn on_prev_month(&mut self) {
        (self.year, self.month) = prev_month(self.year, self.month);
    }

    fn on_next_month(&mut self) {
        (self.year, self.month) = next_month(self.year, self.month);
    }

    fn on_today(&mut self) {
        (self.year, self.month) = jump_to_today(self.today);
    }
}

/// Month and weekday labels, injected so the engine stays locale-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// January first.
    pub months: [String; 12],
    /// Monday first.
    pub weekdays: [String; 7],
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl Labels {
    pub fn english() -> Self {
        Self::for_locale(Locale::en_US)
    }

    /// Labels for a chrono locale. Russian, Ukrainian and Belarusian month
    /// names use the nominative case.
    pub fn for_locale(locale: Locale) -> Self {
        let months = std::array::from_fn(|i| month_name(i as u32, locale));
        let weekdays = std::array::from_fn(|i| weekday_short_name(WEEK[i], locale));
        Labels { months, weekdays }
    }

    pub fn month(&self, month: u32) -> &str {
        &self.months[(month % 12) as usize]
    }

    pub fn weekday(&self, column: usize) -> &str {
        &self.weekdays[column % 7]
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

fn month_name(month: u32, locale: Locale) -> String {
    const RU: [&str; 12] = [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
        "Октябрь", "Ноябрь", "Декабрь",
    ];
    const UK: [&str; 12] = [
        "Січень", "Лютий", "Березень", "Квітень", "Травень", "Червень", "Липень", "Серпень",
        "Вересень", "Жовтень", "Листопад", "Грудень",
    ];
    const BE: [&str; 12] = [
        "Студзень", "Люты", "Сакавік", "Красавік", "Май", "Чэрвень", "Ліпень", "Жнівень",
        "Верасень", "Кастрычнік", "Лістапад", "Снежань",
    ];

    let idx = (month % 12) as usize;
    match locale {
        Locale::ru_RU => RU[idx].to_string(),
        Locale::uk_UA => UK[idx].to_string(),
        Locale::be_BY => BE[idx].to_string(),
        _ => NaiveDate::from_ymd_opt(2000, idx as u32 + 1, 1)
            .map(|date| date.format_localized("%B", locale).to_string())
            .unwrap_or_default(),
    }
}

fn weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    // 2000-01-03 was a Monday
    NaiveDate::from_ymd_opt(2000, 1, 3 + weekday.num_days_from_monday())
        .map(|date| date.format_localized("%a", locale).to_string())
        .unwrap_or_default()
}
