//! Unit tests for grid calculation, bucketing, overflow, navigation and the event source.

use chrono::{Datelike, FixedOffset, NaiveDate, Utc, Weekday};

use club_cal::bucket::{bucket_events, parse_instant};
use club_cal::calendar::{
    build_grid, days_in_month, first_day_of_month, first_weekday_offset, is_leap_year,
};
use club_cal::error::Error;
use club_cal::navigation::{
    is_current_month, jump_to_today, next_month, normalize, prev_month, shift_month,
};
use club_cal::overflow::{DEFAULT_OVERFLOW_CAP, apply_overflow};
use club_cal::source::{load_events, parse_events};
use club_cal::types::{CalendarEvent, EventKind, ViewerZone};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(id: &str, start: &str) -> CalendarEvent {
    CalendarEvent::new(id, "training", format!("Session {id}"), start, start, "U12")
}

fn ids(events: &[&CalendarEvent]) -> Vec<String> {
    events.iter().map(|e| e.id.clone()).collect()
}

// ===========================================================================
// Leap year and month length
// ===========================================================================

mod leap_year {
    use super::*;

    #[test]
    fn divisible_by_400() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
    }

    #[test]
    fn divisible_by_4_not_100() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2028));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn century_not_leap() {
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn year_zero_and_negative() {
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }
}

mod days_in_month {
    use super::*;

    #[test]
    fn months_with_31_days() {
        for month in [0, 2, 4, 6, 7, 9, 11] {
            assert_eq!(days_in_month(2024, month), 31, "month {month}");
        }
    }

    #[test]
    fn months_with_30_days() {
        for month in [3, 5, 8, 10] {
            assert_eq!(days_in_month(2024, month), 30, "month {month}");
        }
    }

    #[test]
    fn february() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn matches_chrono() {
        for year in 1890..=2110 {
            for month in 0..12u32 {
                let first = date(year, month + 1, 1);
                let (ny, nm) = next_month(year, month);
                let next_first = date(ny, nm + 1, 1);
                let expected = next_first.signed_duration_since(first).num_days() as u32;
                assert_eq!(days_in_month(year, month), expected, "{year}-{month}");
            }
        }
    }
}

// ===========================================================================
// First day of month (Zeller's congruence)
// ===========================================================================

mod first_day_of_month {
    use super::*;

    #[test]
    fn known_dates() {
        assert_eq!(first_day_of_month(2024, 0), Weekday::Mon);
        assert_eq!(first_day_of_month(2025, 0), Weekday::Wed);
        assert_eq!(first_day_of_month(2024, 1), Weekday::Thu);
        assert_eq!(first_day_of_month(2026, 1), Weekday::Sun);
        assert_eq!(first_day_of_month(2000, 0), Weekday::Sat);
        assert_eq!(first_day_of_month(1900, 2), Weekday::Thu);
    }

    #[test]
    fn january_and_february_use_previous_year_in_formula() {
        assert_eq!(first_day_of_month(2023, 0), Weekday::Sun);
        assert_eq!(first_day_of_month(2023, 1), Weekday::Wed);
    }

    #[test]
    fn proleptic_years() {
        // 400-year cycle is a whole number of weeks
        assert_eq!(first_day_of_month(0, 0), Weekday::Sat);
        assert_eq!(first_day_of_month(-400, 0), Weekday::Sat);
    }

    #[test]
    fn matches_chrono_across_centuries() {
        for year in (-1200..=2400).step_by(7) {
            for month in 0..12u32 {
                let expected = date(year, month + 1, 1).weekday();
                assert_eq!(first_day_of_month(year, month), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn out_of_range_month_carries_into_year() {
        assert_eq!(first_day_of_month(2024, 14), Weekday::Sat);
        assert_eq!(first_weekday_offset(2024, 14), 5);
        for month in 12..=30u32 {
            let (year, normalized) = normalize(2024, i64::from(month));
            let expected = date(year, normalized + 1, 1).weekday();
            assert_eq!(first_day_of_month(2024, month), expected, "month {month}");
            assert_eq!(
                first_weekday_offset(2024, month),
                expected.num_days_from_monday() as usize
            );
        }
    }

    #[test]
    fn offset_is_monday_first() {
        assert_eq!(first_weekday_offset(2024, 0), 0); // Monday
        assert_eq!(first_weekday_offset(2024, 1), 3); // Thursday
        assert_eq!(first_weekday_offset(2000, 0), 5); // Saturday
        assert_eq!(first_weekday_offset(2026, 1), 6); // Sunday
    }
}

// ===========================================================================
// Grid builder
// ===========================================================================

mod grid {
    use super::*;

    fn today() -> NaiveDate {
        date(2024, 1, 15)
    }

    #[test]
    fn leap_february_has_29_days() {
        let grid = build_grid(2024, 1, today());
        assert_eq!(grid.days().count(), 29);
        assert_eq!(build_grid(2023, 1, today()).days().count(), 28);
    }

    #[test]
    fn completeness_and_alignment() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 0..12u32 {
                let grid = build_grid(year, month, today());
                assert_eq!(grid.days().count() as u32, days_in_month(year, month));
                assert_eq!(grid.leading_blanks(), first_weekday_offset(year, month));
                assert!(grid.leading_blanks() < 7);

                for (idx, cell) in grid.cells.iter().enumerate() {
                    let Some(cell) = cell else { continue };
                    let actual = date(year, month + 1, cell.day).weekday();
                    assert_eq!(cell.weekday, actual);
                    assert_eq!(idx % 7, actual.num_days_from_monday() as usize);
                }
            }
        }
    }

    #[test]
    fn days_are_in_order_without_trailing_padding() {
        let grid = build_grid(2024, 1, today());
        let days: Vec<u32> = grid.days().map(|c| c.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
        assert_eq!(grid.cells.len(), 3 + 29);
        assert!(grid.cells.last().unwrap().is_some());
    }

    #[test]
    fn short_last_row() {
        let grid = build_grid(2024, 0, today());
        let weeks: Vec<_> = grid.weeks().collect();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks.last().unwrap().len(), 3);
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn february_starting_monday_fills_four_rows() {
        let grid = build_grid(2021, 1, today());
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.week_count(), 4);
    }

    #[test]
    fn weekend_from_column() {
        let grid = build_grid(2024, 0, today());
        let weekend: Vec<u32> = grid
            .days()
            .filter(|c| c.is_weekend)
            .map(|c| c.day)
            .collect();
        assert_eq!(weekend, vec![6, 7, 13, 14, 20, 21, 27, 28]);
    }

    #[test]
    fn today_flag() {
        let grid = build_grid(2024, 0, today());
        let todays: Vec<u32> = grid.days().filter(|c| c.is_today).map(|c| c.day).collect();
        assert_eq!(todays, vec![15]);

        let other = build_grid(2024, 1, today());
        assert!(other.days().all(|c| !c.is_today));
        let other_year = build_grid(2023, 0, today());
        assert!(other_year.days().all(|c| !c.is_today));
    }

    #[test]
    fn deterministic() {
        assert_eq!(build_grid(2024, 4, today()), build_grid(2024, 4, today()));
    }

    #[test]
    fn out_of_range_month_carries_into_year() {
        let grid = build_grid(2024, 12, today());
        assert_eq!((grid.year, grid.month), (2025, 0));
        assert_eq!(grid, build_grid(2025, 0, today()));
    }
}

// ===========================================================================
// Timestamp resolution and bucketing
// ===========================================================================

mod bucket {
    use super::*;

    #[test]
    fn parses_supported_forms() {
        let utc = parse_instant("2024-01-15T09:00:00Z").unwrap();
        assert_eq!(parse_instant("2024-01-15T09:00Z"), Some(utc));
        assert_eq!(parse_instant("2024-01-15T12:00+03:00"), Some(utc));
        assert_eq!(parse_instant("2024-01-15T12:00:00.000+03:00"), Some(utc));
        assert_eq!(parse_instant(" 2024-01-15T09:00:00Z "), Some(utc));
    }

    #[test]
    fn rejects_malformed_and_zoneless() {
        assert_eq!(parse_instant("not-a-date"), None);
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("2024-01-15T09:00"), None);
        assert_eq!(parse_instant("2024-02-30T09:00:00Z"), None);
    }

    #[test]
    fn same_local_day() {
        let events = vec![
            event("morning", "2024-01-15T09:00:00Z"),
            event("late", "2024-01-15T23:59:00Z"),
            event("february", "2024-02-15T09:00:00Z"),
        ];
        let buckets = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(ids(&buckets[&15]), vec!["morning", "late"]);
        assert!(buckets.values().flatten().all(|e| e.id != "february"));
    }

    #[test]
    fn empty_input() {
        assert!(bucket_events(&[], 2024, 0, &Utc).is_empty());
    }

    #[test]
    fn midnight_belongs_to_its_own_day() {
        let events = vec![event("midnight", "2024-01-16T00:00:00Z")];
        let buckets = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(ids(&buckets[&16]), vec!["midnight"]);
        assert!(!buckets.contains_key(&15));
    }

    #[test]
    fn localized_in_viewer_zone() {
        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
        let events = vec![
            event("late-utc", "2024-01-31T23:30:00Z"),
            event("early-msk", "2024-01-15T00:30:00+03:00"),
        ];

        let utc = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(ids(&utc[&31]), vec!["late-utc"]);
        assert_eq!(ids(&utc[&14]), vec!["early-msk"]);

        let msk = bucket_events(&events, 2024, 0, &plus3);
        assert!(!msk.contains_key(&31));
        assert_eq!(ids(&msk[&15]), vec!["early-msk"]);

        let feb = bucket_events(&events, 2024, 1, &plus3);
        assert_eq!(ids(&feb[&1]), vec!["late-utc"]);
    }

    #[test]
    fn sorted_by_start() {
        let events = vec![
            event("e1", "2024-01-15T15:00Z"),
            event("e2", "2024-01-15T09:00Z"),
            event("e3", "2024-01-15T12:00:00+01:00"),
        ];
        let buckets = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(ids(&buckets[&15]), vec!["e2", "e3", "e1"]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let events = vec![
            event("b", "2024-01-15T10:00:00Z"),
            event("a", "2024-01-15T10:00:00Z"),
            event("c", "2024-01-15T12:00:00+02:00"), // same instant as the others
            event("first", "2024-01-15T08:00:00Z"),
            event("d", "2024-01-15T10:00:00Z"),
        ];
        let buckets = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(ids(&buckets[&15]), vec!["first", "b", "a", "c", "d"]);
    }

    #[test]
    fn malformed_start_is_dropped_only_for_that_event() {
        let events = vec![
            event("ok1", "2024-01-10T10:00:00Z"),
            event("broken", "tomorrow-ish"),
            event("zoneless", "2024-01-10T11:00"),
            event("ok2", "2024-01-10T12:00:00Z"),
        ];
        let buckets = bucket_events(&events, 2024, 0, &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(ids(&buckets[&10]), vec!["ok1", "ok2"]);
    }

    #[test]
    fn start_beyond_local_date_range_is_dropped() {
        let plus14 = FixedOffset::east_opt(14 * 3600).unwrap();
        let events = vec![
            event("far", "+262142-12-31T23:59+00:00"),
            event("e2", "2024-01-15T09:00Z"),
        ];
        assert!(parse_instant(&events[0].start).is_some());

        let buckets = bucket_events(&events, 2024, 0, &plus14);
        assert_eq!(ids(&buckets[&15]), vec!["e2"]);
        assert!(bucket_events(&events, 262142, 11, &plus14).is_empty());

        let utc = bucket_events(&events, 262142, 11, &Utc);
        assert_eq!(ids(&utc[&31]), vec!["far"]);
    }

    #[test]
    fn end_is_not_validated() {
        let mut e = event("backwards", "2024-01-10T10:00:00Z");
        e.end = "2024-01-09T10:00:00Z".to_string();
        let events = vec![e];
        assert_eq!(bucket_events(&events, 2024, 0, &Utc)[&10].len(), 1);
    }

    #[test]
    fn deterministic_and_input_untouched() {
        let events = vec![
            event("x", "2024-03-02T10:00:00Z"),
            event("y", "2024-03-01T10:00:00Z"),
        ];
        let before = events.clone();
        let first = bucket_events(&events, 2024, 2, &Utc);
        let second = bucket_events(&events, 2024, 2, &Utc);
        assert_eq!(first, second);
        assert_eq!(events, before);
        assert_eq!(first.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}

// ===========================================================================
// Overflow policy
// ===========================================================================

mod overflow {
    use super::*;

    fn day_events() -> Vec<CalendarEvent> {
        (0..4)
            .map(|i| event(&format!("e{i}"), &format!("2024-01-15T0{i}:00:00Z")))
            .collect()
    }

    #[test]
    fn default_cap_is_two() {
        assert_eq!(DEFAULT_OVERFLOW_CAP, 2);
    }

    #[test]
    fn four_events_cap_two() {
        let events = day_events();
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let result = apply_overflow(&refs, 2);
        assert_eq!(result.shown.len(), 2);
        assert_eq!(result.hidden_count, 2);
        assert_eq!(ids(result.shown), vec!["e0", "e1"]);
        assert!(result.has_hidden());
    }

    #[test]
    fn single_event() {
        let events = day_events();
        let refs: Vec<&CalendarEvent> = events.iter().take(1).collect();
        let result = apply_overflow(&refs, DEFAULT_OVERFLOW_CAP);
        assert_eq!(result.hidden_count, 0);
        assert_eq!(ids(result.shown), vec!["e0"]);
    }

    #[test]
    fn exactly_cap() {
        let events = day_events();
        let refs: Vec<&CalendarEvent> = events.iter().take(2).collect();
        let result = apply_overflow(&refs, 2);
        assert_eq!(result.shown.len(), 2);
        assert_eq!(result.hidden_count, 0);
    }

    #[test]
    fn larger_cap_extends_prefix() {
        let events = day_events();
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let small = apply_overflow(&refs, 2);
        let large = apply_overflow(&refs, 3);
        assert_eq!(&large.shown[..2], small.shown);
        assert_eq!(large.hidden_count, 1);
        assert_eq!(refs.len(), 4);
    }

    #[test]
    fn zero_cap_hides_everything() {
        let events = day_events();
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let result = apply_overflow(&refs, 0);
        assert!(result.shown.is_empty());
        assert_eq!(result.hidden_count, 4);
    }

    #[test]
    fn empty_day() {
        let result = apply_overflow(&[], 2);
        assert!(result.shown.is_empty());
        assert_eq!(result.hidden_count, 0);
    }
}

// ===========================================================================
// Navigation
// ===========================================================================

mod navigation {
    use super::*;

    #[test]
    fn wraps_year() {
        assert_eq!(next_month(2024, 11), (2025, 0));
        assert_eq!(prev_month(2024, 0), (2023, 11));
    }

    #[test]
    fn within_year() {
        assert_eq!(next_month(2024, 4), (2024, 5));
        assert_eq!(prev_month(2024, 4), (2024, 3));
    }

    #[test]
    fn prev_and_next_are_inverse() {
        for month in 0..12 {
            let (y, m) = next_month(2024, month);
            assert_eq!(prev_month(y, m), (2024, month));
        }
    }

    #[test]
    fn long_walks_agree_with_shift() {
        let mut state = (2024, 0);
        for _ in 0..1000 {
            state = next_month(state.0, state.1);
        }
        assert_eq!(state, shift_month(2024, 0, 1000));
        assert_eq!(state, (2107, 4));

        let mut state = (2024, 0);
        for _ in 0..30_000 {
            state = prev_month(state.0, state.1);
        }
        assert_eq!(state, shift_month(2024, 0, -30_000));
        assert_eq!(state, (-476, 0));
    }

    #[test]
    fn normalize_carries_both_ways() {
        assert_eq!(normalize(2024, 25), (2026, 1));
        assert_eq!(normalize(2024, -1), (2023, 11));
        assert_eq!(normalize(2024, -13), (2022, 11));
        assert_eq!(normalize(2024, 11), (2024, 11));
    }

    #[test]
    fn current_month_detection() {
        let today = date(2024, 3, 10);
        assert!(is_current_month(2024, 2, today));
        assert!(!is_current_month(2024, 1, today));
        assert!(!is_current_month(2024, 3, today));
        assert!(!is_current_month(2023, 2, today));
        assert!(!is_current_month(2025, 2, today));
    }

    #[test]
    fn jump_is_absolute() {
        let today = date(2024, 3, 10);
        assert_eq!(jump_to_today(today), (2024, 2));
        assert_eq!(jump_to_today(date(1999, 12, 31)), (1999, 11));
    }

    #[test]
    fn viewer_zone_from_str() {
        assert_eq!("local".parse::<ViewerZone>(), Ok(ViewerZone::Local));
        assert_eq!("UTC".parse::<ViewerZone>(), Ok(ViewerZone::Utc));
        assert_eq!(
            "+03:00".parse::<ViewerZone>(),
            Ok(ViewerZone::Fixed(FixedOffset::east_opt(3 * 3600).unwrap()))
        );
        assert!("mars".parse::<ViewerZone>().is_err());
    }
}

// ===========================================================================
// Event source
// ===========================================================================

mod source {
    use super::*;

    #[test]
    fn parses_event_list() {
        let events = parse_events(
            r#"[
                {"id": "t1", "kind": "training", "title": "Drill",
                 "start": "2024-01-15T09:00Z", "end": "2024-01-15T10:00Z", "group": "U12"},
                {"id": "m1", "kind": "Match", "title": "Derby",
                 "start": "2024-01-20T18:00:00Z", "end": "2024-01-20T20:00:00Z"},
                {"id": "x1", "kind": "meeting", "title": "Board",
                 "start": "2024-01-21T18:00:00Z", "end": "2024-01-21T19:00:00Z", "group": "Staff"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Training);
        assert_eq!(events[0].group, "U12");
        assert_eq!(events[1].kind, EventKind::Match);
        assert_eq!(events[1].group, "");
        assert_eq!(events[2].kind, EventKind::Other("meeting".to_string()));
        assert_eq!(events[2].kind.to_string(), "meeting");
    }

    #[test]
    fn malformed_timestamp_still_loads() {
        let events = parse_events(
            r#"[{"id": "b", "kind": "training", "title": "Broken",
                 "start": "someday", "end": ""}]"#,
        )
        .unwrap();
        assert_eq!(events[0].start, "someday");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_events("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_events("/nonexistent/events.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/events.json"));
    }

    #[test]
    fn loads_fixture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/events.json");
        let events = load_events(path).unwrap();
        assert_eq!(events.len(), 7);
    }
}
