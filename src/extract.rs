//! Extraction d'un planning depuis le classeur du roster (première feuille).
//!
//! La ligne de la personne est trouvée par son nom exact ; la ligne d'en-tête
//! des dates est fixe (numérotée à partir de 1, comme dans le tableur).

use crate::model::ScheduleEntry;
use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::info;

/// Ligne d'en-tête des dates dans le roster de référence.
pub const DEFAULT_DATE_ROW: u32 = 5;

pub fn extract_from_workbook<P: AsRef<Path>>(
    path: P,
    name: &str,
    date_row: u32,
) -> Result<Vec<ScheduleEntry>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet {sheet}"))?;
    let entries = extract_schedule(&range, name, date_row)?;
    info!(sheet = %sheet, entries = entries.len(), "schedule extracted");
    Ok(entries)
}

/// Associe la ligne de `name` à la ligne des dates, colonne par colonne.
///
/// Les colonnes sans valeur pour la personne sont ignorées.
pub fn extract_schedule(
    range: &Range<Data>,
    name: &str,
    date_row: u32,
) -> Result<Vec<ScheduleEntry>> {
    if date_row == 0 {
        bail!("date row is 1-based");
    }
    let header = date_row - 1;
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        bail!("sheet is empty");
    };

    let schedule_row =
        find_name_row(range, name).with_context(|| format!("couldn't find '{name}' in sheet"))?;

    let filled: Vec<u32> = (start.1..=end.1)
        .filter(|&col| !cell_text(range.get_value((header, col))).is_empty())
        .collect();
    let (Some(&first), Some(&last)) = (filled.first(), filled.last()) else {
        bail!("no dates found in row {date_row}");
    };

    let mut out = Vec::new();
    for col in first..=last {
        let code = cell_text(range.get_value((schedule_row, col)));
        if code.is_empty() {
            continue;
        }
        let day = parse_day(range.get_value((header, col))).with_context(|| {
            format!("invalid date header in cell {}{date_row}", column_letter(col))
        })?;
        out.push(ScheduleEntry::new(day, code));
    }
    Ok(out)
}

/// Ligne absolue (base 0) de la première cellule égale à `name`.
pub fn find_name_row(range: &Range<Data>, name: &str) -> Option<u32> {
    let (start_row, _) = range.start()?;
    range
        .cells()
        .find(|(_, _, value)| cell_text(Some(*value)) == name)
        .map(|(row, _, _)| start_row + row as u32)
}

fn cell_text(value: Option<&Data>) -> String {
    let raw = match value {
        None | Some(Data::Empty) => return String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Float(f)) => format!("{f}"),
        Some(Data::Int(i)) => format!("{i}"),
        Some(Data::Bool(b)) => format!("{b}"),
        Some(other) => format!("{other:?}"),
    };
    raw.trim().to_string()
}

fn parse_day(value: Option<&Data>) -> Result<u32> {
    let day = match value {
        Some(Data::Int(i)) => *i,
        Some(Data::Float(f)) if f.fract() == 0.0 => *f as i64,
        Some(Data::String(s)) => s.trim().parse::<i64>().context("not a number")?,
        other => bail!("expected a day number, found {other:?}"),
    };
    if !(1..=31).contains(&day) {
        bail!("day {day} out of range 1..=31");
    }
    Ok(day as u32)
}

/// Lettres de colonne façon tableur (0 → A, 26 → AA).
pub fn column_letter(col: u32) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
