use crate::calendar::Calendar;
use crate::model::ResolvedEvent;
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

/// Avertissement non bloquant produit pendant la résolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownShift { code: String, day: u32 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownShift { code, day } => write!(
                f,
                "Unknown shift: {code} for day {day}. Adding as whole day event."
            ),
        }
    }
}

/// Résultat de la résolution d'une entrée.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub event: ResolvedEvent,
    pub warning: Option<Warning>,
}

/// Résultat d'une passe complète.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub calendar: Calendar,
    pub warnings: Vec<Warning>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("day {day} does not exist in {year}-{month:02} (month offset {month_offset})")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        month_offset: u32,
    },
    #[error("local time {time} does not exist in {zone}")]
    NonexistentLocalTime { time: NaiveDateTime, zone: &'static str },
}
