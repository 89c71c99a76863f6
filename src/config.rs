use crate::model::{ShiftDefinition, ShiftTable};
use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Zone fixe du roster de référence.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Singapore;

/// Configuration d'un rendu : mois de base, zone et table des shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub year: i32,
    pub month: u32,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default = "default_shifts")]
    pub shifts: Vec<ShiftDefinition>,
}

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

fn default_shifts() -> Vec<ShiftDefinition> {
    vec![
        ShiftDefinition::timed("A1", "A1", 8, 9),
        ShiftDefinition::timed("A2", "A2", 9, 9),
        ShiftDefinition::timed("P1", "P1", 12, 8),
        ShiftDefinition::timed("P2", "P2", 14, 8),
        ShiftDefinition::timed("P3", "P3", 17, 6),
        ShiftDefinition::timed("N", "Night", 22, 10),
        ShiftDefinition::whole_day("X", "Post-Night"),
        ShiftDefinition::whole_day("SB1", "Standby"),
        ShiftDefinition::whole_day("SB2", "Standby"),
        ShiftDefinition::whole_day("OFF", "Off"),
        ShiftDefinition::timed("SSU", "SSU", 10, 9),
        ShiftDefinition::timed("SSUw", "SSU Weekend", 8, 4),
        ShiftDefinition::whole_day("AL", "Annual Leave"),
        ShiftDefinition::whole_day("TL", "Training Leave"),
    ]
}

/// Table des shifts du roster de référence.
pub fn builtin_table() -> ShiftTable {
    ShiftTable::new(default_shifts())
}

impl RosterConfig {
    /// Table intégrée, zone `Asia/Singapore`.
    pub fn builtin(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            timezone: DEFAULT_TIMEZONE,
            shifts: default_shifts(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let config: RosterConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            bail!("month must be within 1..=12 (got {})", self.month);
        }
        let mut seen = HashSet::new();
        for shift in &self.shifts {
            if shift.code.trim().is_empty() {
                bail!("shift code cannot be empty");
            }
            if has_line_break(&shift.code) || has_line_break(&shift.display_name) {
                bail!("shift {:?}: code and name must be single-line", shift.code);
            }
            if !seen.insert(shift.code.as_str()) {
                bail!("duplicate shift code: {}", shift.code);
            }
            match (shift.start_hour, shift.duration_minutes) {
                (Some(h), _) if h > 23 => {
                    bail!("shift {}: start_hour must be within 0..=23", shift.code)
                }
                (Some(_), None) | (Some(_), Some(0)) => {
                    bail!("shift {}: timed shift needs a positive duration", shift.code)
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn table(&self) -> ShiftTable {
        ShiftTable::new(self.shifts.clone())
    }
}

pub(crate) fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}
