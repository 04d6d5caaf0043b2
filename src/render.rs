//! Terminal rendering of a month view with color support.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::{
    COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CalendarEvent,
    ColumnsMode, DAYS_PER_WEEK, DEFAULT_CELL_WIDTH, DayCell, EventKind, MAX_CELL_WIDTH,
    MIN_CELL_WIDTH, ViewContext,
};
use crate::view::{DayView, Labels, MonthView};

/// Label of the "jump to today" affordance.
pub const TODAY_AFFORDANCE: &str = "[t] today";

impl ViewContext {
    pub fn cell_width(&self) -> usize {
        match self.columns {
            ColumnsMode::Fixed(n) => n.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
            ColumnsMode::Auto => {
                // seven cells separated by single spaces
                if let Some(term_width) = get_terminal_width() {
                    (term_width.saturating_sub(DAYS_PER_WEEK - 1) / DAYS_PER_WEEK)
                        .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
                } else {
                    DEFAULT_CELL_WIDTH
                }
            }
        }
    }
}

/// Fit text into exactly `width` columns, truncating with an ellipsis.
pub fn fit_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        result.push(c);
        used += w;
    }
    if width > 0 {
        result.push('…');
        used += 1;
    }
    result.push_str(&" ".repeat(width.saturating_sub(used)));
    result
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

fn paint(text: String, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, COLOR_RESET)
    } else {
        text
    }
}

pub fn kind_marker(kind: &EventKind) -> char {
    match kind {
        EventKind::Training => 'T',
        EventKind::Match => 'M',
        EventKind::Other(_) => '*',
    }
}

fn kind_color(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Training => COLOR_TEAL,
        EventKind::Match => COLOR_RED,
        EventKind::Other(_) => COLOR_SAND_YELLOW,
    }
}

pub fn format_month_header(
    year: i32,
    month: u32,
    labels: &Labels,
    width: usize,
    color: bool,
) -> String {
    let header = format!("{} {}", labels.month(month), year);
    paint(center_text(&header, width), COLOR_TEAL, color)
}

pub fn format_weekday_headers(labels: &Labels, cell_width: usize, color: bool) -> String {
    let names: Vec<String> = (0..DAYS_PER_WEEK)
        .map(|column| fit_text(labels.weekday(column), cell_width))
        .collect();
    paint(names.join(" "), COLOR_SAND_YELLOW, color)
}

/// Format day number cell.
///
/// Color priority: today > weekend > regular
fn format_day(ctx: &ViewContext, cell: &DayCell, width: usize) -> String {
    let day_str = format!("{:>2}", cell.day);
    let padding = " ".repeat(width.saturating_sub(day_str.len()));

    let formatted = if ctx.color && cell.is_today {
        format!("{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET)
    } else if ctx.color && cell.is_weekend {
        format!("{}{}{}", COLOR_RED, day_str, COLOR_RESET)
    } else {
        day_str
    };
    format!("{}{}", formatted, padding)
}

fn format_event(ctx: &ViewContext, event: &CalendarEvent, width: usize) -> String {
    let text = fit_text(&format!("{} {}", kind_marker(&event.kind), event.title), width);
    paint(text, kind_color(&event.kind), ctx.color)
}

fn format_hidden(hidden: usize, width: usize) -> String {
    if hidden == 0 {
        " ".repeat(width)
    } else {
        fit_text(&format!("+{} more", hidden), width)
    }
}

fn format_week(ctx: &ViewContext, week: &[Option<DayView<'_>>], width: usize) -> Vec<String> {
    let blank = " ".repeat(width);
    let mut lines = Vec::new();

    let days: Vec<String> = week
        .iter()
        .map(|d| match d {
            Some(day) => format_day(ctx, &day.cell, width),
            None => blank.clone(),
        })
        .collect();
    lines.push(days.join(" "));

    let overflows: Vec<_> = week
        .iter()
        .map(|d| d.as_ref().map(|day| day.overflow()))
        .collect();

    let rows = overflows
        .iter()
        .flatten()
        .map(|o| o.shown.len())
        .max()
        .unwrap_or(0);

    for row in 0..rows {
        let cells: Vec<String> = overflows
            .iter()
            .map(|o| match o.as_ref().and_then(|o| o.shown.get(row)) {
                Some(event) => format_event(ctx, event, width),
                None => blank.clone(),
            })
            .collect();
        lines.push(cells.join(" "));
    }

    if overflows.iter().flatten().any(|o| o.has_hidden()) {
        let cells: Vec<String> = overflows
            .iter()
            .map(|o| format_hidden(o.as_ref().map_or(0, |o| o.hidden_count), width))
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// Format a month view as lines of text.
pub fn render_month(ctx: &ViewContext, view: &MonthView<'_>, labels: &Labels) -> Vec<String> {
    let width = ctx.cell_width();
    let total_width = width * DAYS_PER_WEEK + DAYS_PER_WEEK - 1;

    let mut lines = vec![
        format_month_header(view.year, view.month, labels, total_width, ctx.color),
        format_weekday_headers(labels, width, ctx.color),
    ];

    for week in view.weeks() {
        lines.extend(format_week(ctx, week, width));
    }

    if view.show_today {
        lines.push(TODAY_AFFORDANCE.to_string());
    }

    lines
}

/// Print a month view to stdout.
pub fn print_month(ctx: &ViewContext, view: &MonthView<'_>, labels: &Labels) {
    for line in render_month(ctx, view, labels) {
        println!("{}", line);
    }
}

/// Format event details for the event-click route.
pub fn format_event_details(event: &CalendarEvent) -> Vec<String> {
    vec![
        format!("/{}/{}", event.kind, event.id),
        format!("{} ({})", event.title, event.kind),
        format!("group: {}", event.group),
        format!("start: {}", event.start),
        format!("end:   {}", event.end),
    ]
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
