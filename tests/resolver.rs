#![forbid(unsafe_code)]
use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use chrono_tz::Asia::Singapore;
use rostercal::{
    EventTime, ResolveError, Resolver, RosterConfig, ScheduleEntry, ShiftDefinition, Warning,
};

fn resolver() -> Resolver {
    Resolver::new(&RosterConfig::builtin(2022, 1))
}

fn date(y: i32, m: u32, d: u32) -> EventTime {
    EventTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn timed_shift_resolves_in_fixed_zone() {
    let r = resolver();
    let res = r.resolve(&ScheduleEntry::new(15, "A1"), 0).unwrap();

    let start = Singapore.with_ymd_and_hms(2022, 1, 15, 8, 0, 0).unwrap();
    let end = Singapore.with_ymd_and_hms(2022, 1, 15, 17, 0, 0).unwrap();
    assert_eq!(res.event.summary, "A1");
    assert_eq!(res.event.start, EventTime::DateTime(start));
    assert_eq!(res.event.end, EventTime::DateTime(end));
    assert!(res.warning.is_none());
}

#[test]
fn night_shift_ends_next_morning() {
    let res = resolver().resolve(&ScheduleEntry::new(31, "N"), 0).unwrap();
    let end = Singapore.with_ymd_and_hms(2022, 2, 1, 8, 0, 0).unwrap();
    assert_eq!(res.event.summary, "Night");
    assert_eq!(res.event.end, EventTime::DateTime(end));
}

#[test]
fn whole_day_shift_spans_one_day() {
    let res = resolver().resolve(&ScheduleEntry::new(3, "OFF"), 0).unwrap();
    assert_eq!(res.event.summary, "Off");
    assert_eq!(res.event.start, date(2022, 1, 3));
    assert_eq!(res.event.end, date(2022, 1, 4));
    assert_eq!(
        res.event.end.date() - res.event.start.date(),
        Duration::days(1)
    );
    assert!(res.warning.is_none());
}

#[test]
fn unknown_code_falls_back_to_whole_day_with_warning() {
    let res = resolver().resolve(&ScheduleEntry::new(10, "ZZZ"), 0).unwrap();
    assert_eq!(res.event.summary, "ZZZ");
    assert_eq!(res.event.start, date(2022, 1, 10));
    assert_eq!(res.event.end, date(2022, 1, 11));
    assert_eq!(
        res.warning,
        Some(Warning::UnknownShift {
            code: "ZZZ".into(),
            day: 10
        })
    );
}

#[test]
fn month_rollover_applies_to_the_rest_of_the_walk() {
    let entries = vec![
        ScheduleEntry::new(28, "OFF"),
        ScheduleEntry::new(29, "OFF"),
        ScheduleEntry::new(1, "A1"),
        ScheduleEntry::new(2, "A1"),
    ];
    let resolved = resolver().resolve_all(&entries).unwrap();
    let events = resolved.calendar.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].start, date(2022, 1, 28));
    assert_eq!(events[1].start, date(2022, 1, 29));
    assert_eq!(
        events[2].start,
        EventTime::DateTime(Singapore.with_ymd_and_hms(2022, 2, 1, 8, 0, 0).unwrap())
    );
    assert_eq!(
        events[3].start,
        EventTime::DateTime(Singapore.with_ymd_and_hms(2022, 2, 2, 8, 0, 0).unwrap())
    );
    assert!(resolved.warnings.is_empty());
}

#[test]
fn rollover_from_december_moves_to_next_year() {
    let r = Resolver::new(&RosterConfig::builtin(2021, 12));
    let entries = vec![ScheduleEntry::new(31, "OFF"), ScheduleEntry::new(1, "AL")];
    let resolved = r.resolve_all(&entries).unwrap();
    assert_eq!(resolved.calendar.events()[1].start, date(2022, 1, 1));
    assert_eq!(resolved.calendar.events()[1].summary, "Annual Leave");
}

#[test]
fn resolution_is_total_and_keeps_input_order() {
    let codes = ["A1", "X", "??", "SB1", "P3", "TL", "", "N"];
    let entries: Vec<ScheduleEntry> = codes
        .iter()
        .enumerate()
        .map(|(i, c)| ScheduleEntry::new(i as u32 + 1, *c))
        .collect();
    let resolved = resolver().resolve_all(&entries).unwrap();

    assert_eq!(resolved.calendar.len(), entries.len());
    assert_eq!(resolved.warnings.len(), 2);
    for (entry, event) in entries.iter().zip(resolved.calendar.events()) {
        assert_eq!(event.start.date().day0() + 1, entry.day);
    }
}

#[test]
fn day_missing_from_shifted_month_is_an_error() {
    let entries = vec![ScheduleEntry::new(31, "OFF"), ScheduleEntry::new(30, "OFF")];
    let err = resolver().resolve_all(&entries).unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidDate {
            year: 2022,
            month: 1,
            day: 30,
            month_offset: 1
        }
    );
}

#[test]
fn custom_table_and_zone_are_used() {
    let config = RosterConfig {
        year: 2022,
        month: 3,
        timezone: chrono_tz::Europe::Paris,
        shifts: vec![ShiftDefinition::timed("E", "Early", 6, 8)],
    };
    config.validate().unwrap();
    let res = Resolver::new(&config)
        .resolve(&ScheduleEntry::new(27, "E"), 0)
        .unwrap();
    let start = chrono_tz::Europe::Paris
        .with_ymd_and_hms(2022, 3, 27, 6, 0, 0)
        .unwrap();
    assert_eq!(res.event.start, EventTime::DateTime(start));
    assert_eq!(res.event.end, EventTime::DateTime(start + Duration::hours(8)));
}

#[test]
fn resolving_twice_gives_identical_output() {
    let entries = vec![
        ScheduleEntry::new(30, "P2"),
        ScheduleEntry::new(31, "ZZZ"),
        ScheduleEntry::new(1, "SSU"),
    ];
    let a = resolver().resolve_all(&entries).unwrap();
    let b = resolver().resolve_all(&entries).unwrap();
    assert_eq!(a.calendar, b.calendar);
    assert_eq!(a.calendar.to_ics(), b.calendar.to_ics());
    assert_eq!(a.warnings, b.warnings);
}

#[test]
fn start_in_dst_gap_is_an_error() {
    let config = RosterConfig {
        year: 2022,
        month: 3,
        timezone: chrono_tz::Europe::Paris,
        shifts: vec![ShiftDefinition::timed("G", "Graveyard", 2, 6)],
    };
    config.validate().unwrap();
    let err = Resolver::new(&config)
        .resolve(&ScheduleEntry::new(27, "G"), 0)
        .unwrap_err();
    let gap = NaiveDate::from_ymd_opt(2022, 3, 27)
        .unwrap()
        .and_hms_opt(2, 0, 0)
        .unwrap();
    assert_eq!(
        err,
        ResolveError::NonexistentLocalTime {
            time: gap,
            zone: "Europe/Paris"
        }
    );
    assert!(err.to_string().contains("does not exist in Europe/Paris"));
}
