//! Passerelle vers `icalendar` : des VEVENT avec SUMMARY, DTSTART et DTEND.
//!
//! - Journée entière : `DTSTART;VALUE=DATE:20220103`.
//! - Horodaté : `DTSTART;TZID=Asia/Singapore:20220115T080000`.
//!
//! UID (v5) et DTSTAMP sont dérivés de l'événement : deux rendus identiques
//! produisent les mêmes octets.

use crate::model::{EventTime, ResolvedEvent};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar as IcalCalendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime,
    Event, EventLike,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcsError {
    #[error("invalid iCalendar document: {0}")]
    Parse(String),
    #[error("event {index}: missing {property}")]
    MissingProperty { index: usize, property: &'static str },
    #[error("event {index}: invalid {property} value `{value}`")]
    InvalidValue {
        index: usize,
        property: &'static str,
        value: String,
    },
}

/// Sérialise les événements dans l'ordre fourni.
pub fn render(events: &[ResolvedEvent]) -> String {
    let mut calendar = IcalCalendar::new();
    for (idx, event) in events.iter().enumerate() {
        calendar.push(to_ical_event(idx, event));
    }
    calendar.done().to_string()
}

/// UID stable : dérivé de la position et du contenu de l'événement.
pub fn event_uid(idx: usize, event: &ResolvedEvent) -> Uuid {
    let name = format!("{idx}/{}/{}", event.summary, event.start);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// DTSTAMP fixe : début de l'événement en UTC (minuit UTC pour une journée entière).
fn event_stamp(event: &ResolvedEvent) -> DateTime<Utc> {
    match &event.start {
        EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
        EventTime::DateTime(dt) => dt.with_timezone(&Utc),
    }
}

fn to_ical_event(idx: usize, event: &ResolvedEvent) -> Event {
    Event::new()
        .uid(&event_uid(idx, event).to_string())
        .timestamp(event_stamp(event))
        .summary(&event.summary)
        .starts(to_ical_time(&event.start))
        .ends(to_ical_time(&event.end))
        .done()
}

fn to_ical_time(time: &EventTime) -> DatePerhapsTime {
    match time {
        EventTime::Date(d) => DatePerhapsTime::Date(*d),
        EventTime::DateTime(dt) => DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
            date_time: dt.naive_local(),
            tzid: dt.timezone().name().to_string(),
        }),
    }
}

fn from_ical_time(
    index: usize,
    property: &'static str,
    value: DatePerhapsTime,
) -> Result<EventTime, IcsError> {
    let invalid = |value: String| IcsError::InvalidValue {
        index,
        property,
        value,
    };
    match value {
        DatePerhapsTime::Date(d) => Ok(EventTime::Date(d)),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => {
            Ok(EventTime::DateTime(dt.with_timezone(&Tz::UTC)))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let tz: Tz = tzid.parse().map_err(|_| invalid(format!("TZID={tzid}")))?;
            let dt = tz
                .from_local_datetime(&date_time)
                .earliest()
                .ok_or_else(|| invalid(format!("{date_time} {tzid}")))?;
            Ok(EventTime::DateTime(dt))
        }
        DatePerhapsTime::DateTime(other) => Err(invalid(format!("{other:?} (floating time)"))),
    }
}

/// Relit un document iCalendar en événements, dans l'ordre des VEVENT.
pub fn parse(input: &str) -> Result<Vec<ResolvedEvent>, IcsError> {
    let calendar: IcalCalendar = input.parse().map_err(IcsError::Parse)?;

    calendar
        .components
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
        .enumerate()
        .map(|(index, event)| {
            let start = event.get_start().ok_or(IcsError::MissingProperty {
                index,
                property: "DTSTART",
            })?;
            let end = event.get_end().ok_or(IcsError::MissingProperty {
                index,
                property: "DTEND",
            })?;
            Ok(ResolvedEvent {
                summary: event.get_summary().unwrap_or_default().to_string(),
                start: from_ical_time(index, "DTSTART", start)?,
                end: from_ical_time(index, "DTEND", end)?,
            })
        })
        .collect()
}
