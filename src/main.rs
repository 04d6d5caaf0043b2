//! Club calendar CLI application.
//!
//! # Usage
//! ```ignore
//! club-cal -e events.json            // Current month
//! club-cal -e events.json 2 2026     // February 2026
//! club-cal -e events.json --next 1   // Next month
//! club-cal -e events.json -n 3       // Three months
//! ```

use club_cal::args::{Args, get_display_month};
use club_cal::error::{Error, Result};
use club_cal::render::{format_event_details, print_month};
use club_cal::source::load_events;
use club_cal::types::ViewContext;
use club_cal::view::{CalendarHost, Labels, MonthView, Navigator, ViewAction};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("club-cal: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let ctx = ViewContext::new(args)?;
    let (year, month) = get_display_month(args, ctx.today)?;
    let events = match &args.events {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };
    let labels = Labels::for_locale(ctx.locale);

    let mut nav = Navigator::new(year, month, ctx.today);
    let mut actions = Vec::new();
    actions.extend((0..args.prev.unwrap_or(0)).map(|_| ViewAction::PrevMonth));
    actions.extend((0..args.next.unwrap_or(0)).map(|_| ViewAction::NextMonth));
    if args.today {
        actions.push(ViewAction::Today);
    }
    if let Some(id) = &args.open {
        actions.push(ViewAction::EventClick(id.clone()));
    }

    for action in &actions {
        let view = MonthView::build_in_zone(
            nav.year, nav.month, &events, ctx.today, ctx.zone, ctx.cap,
        );
        let handled = view.dispatch(action, &mut nav);
        debug!(?action, handled, year = nav.year, month = nav.month, "dispatched");
    }

    if let Some(id) = &args.open {
        let event = nav.opened.as_ref().ok_or_else(|| {
            Error::InvalidArgument(format!("No event {} in the displayed month", id))
        })?;
        for line in format_event_details(event) {
            println!("{}", line);
        }
        return Ok(());
    }

    for i in 0..args.months_count.unwrap_or(1) {
        if i > 0 {
            nav.on_next_month();
            println!();
        }
        let view = MonthView::build_in_zone(
            nav.year, nav.month, &events, ctx.today, ctx.zone, ctx.cap,
        );
        print_month(&ctx, &view, &labels);
    }

    Ok(())
}
