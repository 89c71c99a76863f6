use crate::calendar::Calendar;
use crate::model::{EventTime, ScheduleEntry, ShiftTable};
use chrono::{Duration, NaiveTime};
use serde::Serialize;

const WHOLE_DAY: &str = "Whole Day";
const EVENT_FORMAT: &str = "%b %-d, %-I%P";
const HOUR_FORMAT: &str = "%-I%P";

/// Ligne du tableau de vérification (entrée brute → événement rendu).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRow {
    pub raw: String,
    pub name: String,
    pub start: String,
    pub end: String,
}

pub fn verification_rows(entries: &[ScheduleEntry], calendar: &Calendar) -> Vec<VerificationRow> {
    entries
        .iter()
        .zip(calendar.events())
        .map(|(entry, event)| {
            let (start, end) = if event.is_whole_day() {
                (WHOLE_DAY.to_string(), WHOLE_DAY.to_string())
            } else {
                (format_time(&event.start), format_time(&event.end))
            };
            VerificationRow {
                raw: format!("{:<2} {:<4}", entry.day, entry.shift_code),
                name: event.summary.clone(),
                start,
                end,
            }
        })
        .collect()
}

fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(d) => d.format("%b %-d").to_string(),
        EventTime::DateTime(dt) => dt.format(EVENT_FORMAT).to_string(),
    }
}

pub fn verification_table(rows: &[VerificationRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.raw.clone(), r.name.clone(), r.start.clone(), r.end.clone()])
        .collect();
    format!(
        "iCal output\n{}",
        render_table(&["Raw", "Extracted Name", "Start", "End"], &body)
    )
}

pub fn schedule_table(entries: &[ScheduleEntry]) -> String {
    let body: Vec<Vec<String>> = entries
        .iter()
        .map(|e| vec![e.day.to_string(), e.shift_code.clone()])
        .collect();
    render_table(&["Day", "Shift"], &body)
}

/// Une ligne par définition : `A1: A1 8am-5pm` ou `OFF: Off`.
pub fn legend_lines(table: &ShiftTable) -> Vec<String> {
    table
        .iter()
        .map(|shift| {
            let start = shift
                .start_hour
                .and_then(|h| NaiveTime::from_hms_opt(h, 0, 0));
            match (start, shift.duration()) {
                (Some(start), Some(duration)) => format!(
                    "{}: {} {}-{}",
                    shift.code,
                    shift.display_name,
                    start.format(HOUR_FORMAT),
                    (start + duration).format(HOUR_FORMAT)
                ),
                _ => format!("{}: {}", shift.code, shift.display_name),
            }
        })
        .collect()
}

/// Totalise la durée horodatée du calendrier (les journées entières ne comptent pas).
pub fn timed_total(calendar: &Calendar) -> Duration {
    calendar
        .events()
        .iter()
        .filter_map(|event| match (&event.start, &event.end) {
            (EventTime::DateTime(s), EventTime::DateTime(e)) => Some(*e - *s),
            _ => None,
        })
        .fold(Duration::zero(), |acc, d| acc + d)
}

/// `7h30` ; `9h` quand il n'y a pas de minutes.
pub fn format_hours(total: Duration) -> String {
    let minutes = total.num_minutes();
    match (minutes / 60, minutes % 60) {
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m:02}"),
    }
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}", w = *w))
            .collect();
        format!("| {} |", padded.join(" | "))
    };
    let rule = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = vec![rule.clone(), line(headers.to_vec()), rule.clone()];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.push(rule);
    out.join("\n")
}
