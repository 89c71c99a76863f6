use crate::calendar::Calendar;
use crate::config::has_line_break;
use crate::model::ScheduleEntry;
use crate::report::VerificationRow;
use anyhow::{bail, Context};
use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Lecture du planning JSON : tableau de paires `[day, code]`.
pub fn read_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ScheduleEntry>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let entries: Vec<ScheduleEntry> = serde_json::from_slice(&data)
        .with_context(|| format!("parsing schedule {}", path.display()))?;
    for (idx, entry) in entries.iter().enumerate() {
        if entry.day == 0 {
            bail!("entry {idx}: day must be a positive integer");
        }
        if entry.shift_code.trim().is_empty() {
            bail!("entry {idx}: empty shift code for day {}", entry.day);
        }
        if has_line_break(&entry.shift_code) {
            bail!("entry {idx}: shift code for day {} must be single-line", entry.day);
        }
    }
    Ok(entries)
}

pub fn write_schedule_json<P: AsRef<Path>>(
    path: P,
    entries: &[ScheduleEntry],
) -> anyhow::Result<()> {
    let json = serde_json::to_vec(entries)?;
    write_atomic(path.as_ref(), &json)
}

/// Export iCalendar du calendrier.
pub fn write_calendar<P: AsRef<Path>>(path: P, calendar: &Calendar) -> anyhow::Result<()> {
    write_atomic(path.as_ref(), calendar.to_ics().as_bytes())
}

pub fn read_calendar<P: AsRef<Path>>(path: P) -> anyhow::Result<Calendar> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Calendar::from_ics(&data).with_context(|| format!("parsing calendar {}", path.display()))
}

/// Export CSV du tableau de vérification: header `raw,name,start,end`
pub fn export_report_csv<P: AsRef<Path>>(path: P, rows: &[VerificationRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(())
}

/// Chemin de sortie par défaut : `<stem>.<ext>` dans le répertoire courant.
pub fn default_output(input: &Path, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "roster".to_string());
    PathBuf::from(format!("{stem}.{ext}"))
}

/// Écriture atomique (fichier temporaire + rename).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}
