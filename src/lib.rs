#![forbid(unsafe_code)]
//! Rostercal — du roster mensuel (tableur) au calendrier iCalendar.
//!
//! - Extraction des paires `(jour, code)` depuis le classeur.
//! - Résolution des codes de shift en événements datés (bascule de mois incluse).
//! - Export iCalendar, relecture pour vérification.
//! - Une seule zone horaire fixe par rendu.

pub mod calendar;
pub mod config;
pub mod extract;
pub mod ics;
pub mod io;
pub mod model;
pub mod report;
pub mod resolver;

pub use calendar::Calendar;
pub use config::RosterConfig;
pub use ics::IcsError;
pub use model::{EventTime, ResolvedEvent, ScheduleEntry, ShiftDefinition, ShiftTable};
pub use resolver::{MonthCursor, ResolveError, Resolution, Resolved, Resolver, Warning};
