#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use rostercal::{
    config::{self, RosterConfig},
    extract::{self, DEFAULT_DATE_ROW},
    io, report,
    resolver::Resolver,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Roster mensuel → planning JSON → calendrier iCalendar
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extraire le planning d'une personne depuis le classeur
    Extract {
        /// Classeur du roster (.xlsx, .xls, .ods)
        file: PathBuf,
        /// Nom exact de la personne
        #[arg(long)]
        name: String,
        /// Ligne des dates (numérotation du tableur)
        #[arg(long, default_value_t = DEFAULT_DATE_ROW)]
        date_row: u32,
        /// Défaut : `<classeur>.json` dans le répertoire courant
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Convertir un planning JSON en calendrier iCalendar
    Render {
        /// Planning JSON `[[day, code], ...]`
        schedule: PathBuf,
        /// Configuration JSON (table des shifts, mois, zone)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Nom IANA, ex. `Asia/Singapore`
        #[arg(long)]
        timezone: Option<String>,
        /// Défaut : `<planning>.ical` dans le répertoire courant
        #[arg(long)]
        out: Option<PathBuf>,
        /// Export CSV du tableau de vérification (optionnel)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Afficher la table des shifts pour vérification
    Legend {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Écrire la configuration intégrée comme point de départ
    InitConfig {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value = "rostercal.json")]
        out: PathBuf,
    },

    /// Relire un fichier iCalendar et lister ses événements
    Inspect { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    match cli.cmd {
        Commands::Extract {
            file,
            name,
            date_row,
            out,
        } => {
            let entries = extract::extract_from_workbook(&file, &name, date_row)?;
            println!("{}", report::schedule_table(&entries));
            let out = out.unwrap_or_else(|| io::default_output(&file, "json"));
            io::write_schedule_json(&out, &entries)?;
            println!("Wrote to {}", out.display());
        }
        Commands::Render {
            schedule,
            config,
            year,
            month,
            timezone,
            out,
            report: report_path,
        } => {
            let config = build_config(config, year, month, timezone)?;
            let entries = io::read_schedule_json(&schedule)?;
            let resolver = Resolver::new(&config);
            let resolved = resolver.resolve_all(&entries)?;

            for warning in &resolved.warnings {
                eprintln!("{warning}");
            }

            let rows = report::verification_rows(&entries, &resolved.calendar);
            println!("{}", report::verification_table(&rows));
            if let Some(path) = report_path {
                io::export_report_csv(path, &rows)?;
            }

            let out = out.unwrap_or_else(|| io::default_output(&schedule, "ical"));
            io::write_calendar(&out, &resolved.calendar)?;
            println!(
                "Wrote {} event(s), {} timed, to {}",
                resolved.calendar.len(),
                report::format_hours(report::timed_total(&resolved.calendar)),
                out.display()
            );
        }
        Commands::Legend { config } => {
            let table = match config {
                Some(path) => RosterConfig::load(path)?.table(),
                None => config::builtin_table(),
            };
            for line in report::legend_lines(&table) {
                println!("{line}");
            }
        }
        Commands::InitConfig { year, month, out } => {
            let config = RosterConfig::builtin(year, month);
            config.validate()?;
            let json = serde_json::to_vec_pretty(&config)?;
            io::write_atomic(&out, &json)?;
            println!("Wrote to {}", out.display());
        }
        Commands::Inspect { file } => {
            let calendar = io::read_calendar(&file)?;
            for event in calendar.events() {
                println!("{} | {} → {}", event.summary, event.start, event.end);
            }
            println!("{} event(s)", calendar.len());
        }
    }

    Ok(())
}

/// Fichier de config ou table intégrée ; les options CLI priment.
fn build_config(
    path: Option<PathBuf>,
    year: Option<i32>,
    month: Option<u32>,
    timezone: Option<String>,
) -> Result<RosterConfig> {
    let mut config = match (path, year, month) {
        (Some(path), _, _) => RosterConfig::load(path)?,
        (None, Some(year), Some(month)) => RosterConfig::builtin(year, month),
        (None, _, _) => bail!("--year and --month are required without --config"),
    };
    if let Some(year) = year {
        config.year = year;
    }
    if let Some(month) = month {
        config.month = month;
    }
    if let Some(tz) = timezone {
        config.timezone = tz
            .parse()
            .map_err(|e| anyhow!("unknown timezone {tz}: {e}"))?;
    }
    config.validate()?;
    Ok(config)
}
