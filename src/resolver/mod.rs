mod rollover;
mod types;

pub use rollover::MonthCursor;
pub use types::{ResolveError, Resolution, Resolved, Warning};

use crate::config::RosterConfig;
use crate::model::{EventTime, ResolvedEvent, ScheduleEntry, ShiftTable};
use chrono::{Datelike, Months, NaiveDate, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

/// Resolver : transforme des entrées `(day, code)` en événements calendrier.
///
/// Suppose des entrées bien formées : `day >= 1` et `shift_code` non vide.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: ShiftTable,
    year: i32,
    month: u32,
    timezone: Tz,
}

impl Resolver {
    pub fn new(config: &RosterConfig) -> Self {
        Self {
            table: config.table(),
            year: config.year,
            month: config.month,
            timezone: config.timezone,
        }
    }

    pub fn table(&self) -> &ShiftTable {
        &self.table
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Résout une entrée avec le décalage de mois courant (0 ou 1).
    ///
    /// Un code inconnu donne un événement journée entière nommé d'après le code
    /// brut, accompagné d'un [`Warning`].
    pub fn resolve(
        &self,
        entry: &ScheduleEntry,
        month_offset: u32,
    ) -> Result<Resolution, ResolveError> {
        let date = self.entry_date(entry.day, month_offset)?;
        let shift = self.table.lookup(&entry.shift_code);

        if let Some(def) = shift {
            if let (Some(hour), Some(duration)) = (def.start_hour, def.duration()) {
                let naive = date
                    .and_hms_opt(hour, 0, 0)
                    .ok_or_else(|| self.invalid_date(entry.day, month_offset))?;
                let start = self
                    .timezone
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or(ResolveError::NonexistentLocalTime {
                        time: naive,
                        zone: self.timezone.name(),
                    })?;
                return Ok(Resolution {
                    event: ResolvedEvent {
                        summary: def.display_name.clone(),
                        start: EventTime::DateTime(start),
                        end: EventTime::DateTime(start + duration),
                    },
                    warning: None,
                });
            }
        }

        let warning = match shift {
            Some(_) => None,
            None => {
                debug!(code = %entry.shift_code, day = entry.day, "unknown shift");
                Some(Warning::UnknownShift {
                    code: entry.shift_code.clone(),
                    day: entry.day,
                })
            }
        };
        let summary = shift
            .map(|def| def.display_name.clone())
            .unwrap_or_else(|| entry.shift_code.clone());
        let event = ResolvedEvent::whole_day(summary, date)
            .ok_or_else(|| self.invalid_date(entry.day, month_offset))?;
        Ok(Resolution { event, warning })
    }

    /// Résout toute la séquence en une passe, dans l'ordre d'entrée.
    pub fn resolve_all(&self, entries: &[ScheduleEntry]) -> Result<Resolved, ResolveError> {
        let mut out = Resolved::default();
        let mut cursor = MonthCursor::new();

        for entry in entries {
            let next = cursor.advance(entry.day);
            if next.rolled_over() && !cursor.rolled_over() {
                debug!(day = entry.day, prev_day = cursor.prev_day(), "month rollover detected");
            }
            cursor = next;

            let resolution = self.resolve(entry, cursor.month_offset())?;
            out.calendar.push(resolution.event);
            out.warnings.extend(resolution.warning);
        }

        Ok(out)
    }

    fn entry_date(&self, day: u32, month_offset: u32) -> Result<NaiveDate, ResolveError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|first| first.checked_add_months(Months::new(month_offset)))
            .and_then(|first| first.with_day(day))
            .ok_or_else(|| self.invalid_date(day, month_offset))
    }

    fn invalid_date(&self, day: u32, month_offset: u32) -> ResolveError {
        ResolveError::InvalidDate {
            year: self.year,
            month: self.month,
            day,
            month_offset,
        }
    }
}
