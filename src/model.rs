use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Définition d'un code de shift (ex. "A1", "N", "OFF").
///
/// Sans `start_hour`, le shift est rendu comme un événement « journée entière ».
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub code: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl ShiftDefinition {
    /// Shift horodaté : début à `start_hour`, durée en heures.
    pub fn timed<C: Into<String>, N: Into<String>>(
        code: C,
        name: N,
        start_hour: u32,
        hours: u32,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: name.into(),
            start_hour: Some(start_hour),
            duration_minutes: Some(hours * 60),
        }
    }

    /// Shift sans horaire (congé, repos, astreinte...).
    pub fn whole_day<C: Into<String>, N: Into<String>>(code: C, name: N) -> Self {
        Self {
            code: code.into(),
            display_name: name.into(),
            start_hour: None,
            duration_minutes: None,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_minutes.map(|m| Duration::minutes(i64::from(m)))
    }

    pub fn is_whole_day(&self) -> bool {
        self.start_hour.is_none()
    }
}

/// Table de correspondance code → définition, immuable après construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftTable {
    shifts: Vec<ShiftDefinition>,
}

impl ShiftTable {
    pub fn new(shifts: Vec<ShiftDefinition>) -> Self {
        Self { shifts }
    }

    pub fn lookup(&self, code: &str) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| s.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftDefinition> {
        self.shifts.iter()
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// Entrée extraite du roster : `[day, code]` en JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, String)", into = "(u32, String)")]
pub struct ScheduleEntry {
    pub day: u32,
    pub shift_code: String,
}

impl ScheduleEntry {
    pub fn new<S: Into<String>>(day: u32, shift_code: S) -> Self {
        Self {
            day,
            shift_code: shift_code.into(),
        }
    }
}

impl From<(u32, String)> for ScheduleEntry {
    fn from((day, shift_code): (u32, String)) -> Self {
        Self { day, shift_code }
    }
}

impl From<ScheduleEntry> for (u32, String) {
    fn from(entry: ScheduleEntry) -> Self {
        (entry.day, entry.shift_code)
    }
}

/// Borne d'un événement : date seule (journée entière) ou date-heure dans la zone fixe.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<Tz>),
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date_naive(),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => {
                write!(f, "{} {}", dt.format("%Y-%m-%dT%H:%M"), dt.timezone().name())
            }
        }
    }
}

/// Événement calendrier résolu.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl ResolvedEvent {
    /// Événement « journée entière » : `end = start + 1 jour`.
    pub fn whole_day(summary: String, date: NaiveDate) -> Option<Self> {
        let end = date.succ_opt()?;
        Some(Self {
            summary,
            start: EventTime::Date(date),
            end: EventTime::Date(end),
        })
    }

    pub fn is_whole_day(&self) -> bool {
        self.start.is_date()
    }
}
