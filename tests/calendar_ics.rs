#![forbid(unsafe_code)]
use rostercal::{ics, Calendar, EventTime, IcsError, Resolver, RosterConfig, ScheduleEntry};

fn sample_entries() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::new(14, "A1"),
        ScheduleEntry::new(15, "N"),
        ScheduleEntry::new(31, "OFF"),
        ScheduleEntry::new(1, "ZZZ"),
        ScheduleEntry::new(2, "SSUw"),
    ]
}

fn render_sample() -> Calendar {
    Resolver::new(&RosterConfig::builtin(2022, 1))
        .resolve_all(&sample_entries())
        .unwrap()
        .calendar
}

#[test]
fn rendered_calendar_uses_date_and_zoned_values() {
    let ics = render_sample().to_ics();
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 5);
    assert!(ics.contains("DTSTART;TZID=Asia/Singapore:20220114T080000"));
    assert!(ics.contains("DTEND;TZID=Asia/Singapore:20220116T080000"));
    assert!(ics.contains("DTSTART;VALUE=DATE:20220201"));
    assert!(ics.contains("DTEND;VALUE=DATE:20220202"));
    assert!(ics.contains("SUMMARY:SSU Weekend"));
}

#[test]
fn uid_is_derived_from_event() {
    let calendar = render_sample();
    let ics = calendar.to_ics();
    for (idx, event) in calendar.events().iter().enumerate() {
        let uid = ics::event_uid(idx, event).to_string();
        assert!(ics.contains(&format!("UID:{uid}")), "missing UID {uid}");
    }
    assert!(ics.contains("UID:999e916a-3844-5143-8cd5-f73b95e01416"));
}

#[test]
fn rendering_is_byte_identical_across_runs() {
    assert_eq!(render_sample().to_ics(), render_sample().to_ics());
}

#[test]
fn parse_reproduces_events_in_order() {
    let calendar = render_sample();
    let parsed = Calendar::from_ics(&calendar.to_ics()).unwrap();

    assert_eq!(parsed, calendar);
    for (a, b) in calendar.events().iter().zip(parsed.events()) {
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.is_whole_day(), b.is_whole_day());
        if let (EventTime::DateTime(x), EventTime::DateTime(y)) = (&a.start, &b.start) {
            assert_eq!(x.timezone(), y.timezone());
            assert_eq!(x.naive_local(), y.naive_local());
        }
    }
}

#[test]
fn missing_dtend_is_reported() {
    let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n\
                 BEGIN:VEVENT\r\nSUMMARY:Off\r\n\
                 DTSTART;VALUE=DATE:20220103\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    assert_eq!(
        Calendar::from_ics(input).unwrap_err(),
        IcsError::MissingProperty {
            index: 0,
            property: "DTEND"
        }
    );
}

#[test]
fn empty_calendar_renders_and_parses() {
    let calendar = Calendar::new();
    let parsed = Calendar::from_ics(&calendar.to_ics()).unwrap();
    assert!(parsed.is_empty());
}
