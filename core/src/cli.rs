// core/src/cli.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};

use crate::export::{default_file_name, write_csv};
use crate::models::{format_score, parse_date, BoutKind, LessonRecord, SessionRecord};
use crate::report::build_report;
use crate::storage::{JsonFileStore, RecordStore};

#[derive(Parser)]
#[command(name = "fencemetrics", version, about = "CES / SE / TSE for loggførte fektekamper")]
pub struct Cli {
    /// JSON-lager (trainingBouts / competitionBouts / lessons)
    #[arg(long, global = true, default_value = "fencemetrics.json")]
    pub store: PathBuf,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Training,
    Competition,
}

impl From<KindArg> for BoutKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Training => BoutKind::Training,
            KindArg::Competition => BoutKind::Competition,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Skriv dashbord-rapporten som JSON
    Report {
        /// Referansedato (YYYY-MM-DD); standard er dagens dato
        #[arg(long)]
        date: Option<String>,
        /// Konfig-fil (JSON: season.targets/caps/weights, trailing_days)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Eksporter økter til CSV
    Export {
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Utfil; standard er training.csv / competition.csv
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Legg til en kamp fra en flat JSON-rad (A_ATT, P_ATT, ..., A_ATT_E, ...)
    LogBout {
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Raden som JSON-objekt
        row: String,
        /// Egne treff; gir `score` sammen med --score-opp
        #[arg(long)]
        score_me: Option<u32>,
        /// Motstanderens treff
        #[arg(long)]
        score_opp: Option<u32>,
    },
    /// Legg til en trenertime
    LogLesson {
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 60)]
        minutes: u32,
        #[arg(long)]
        athlete: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // try_init: tester kan kalle run_with flere ganger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .try_init();

    let mut store = JsonFileStore::open(&cli.store)
        .with_context(|| format!("Failed to open store {}", cli.store.display()))?;

    match cli.command {
        Commands::Report { date, config, pretty } => {
            let cfg_json = match &config {
                Some(p) => Some(
                    std::fs::read_to_string(p)
                        .with_context(|| format!("Failed to read config {}", p.display()))?,
                ),
                None => None,
            };
            let cfg = crate::parse_cfg(cfg_json.as_deref()).context("Invalid config")?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Local::now().date_naive(),
            };

            let training = store.sessions(BoutKind::Training)?;
            let competition = store.sessions(BoutKind::Competition)?;
            let lessons = store.lessons()?;
            let report = build_report(&training, &competition, &lessons, date, &cfg);

            let out = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", out);
        }
        Commands::Export { kind, out } => {
            let kind: BoutKind = kind.into();
            let path = out.unwrap_or_else(|| PathBuf::from(default_file_name(kind)));
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = store.sessions(kind)?;
            write_csv(file, &rows, kind)?;
            println!("{} rader → {}", rows.len(), path.display());
        }
        Commands::LogBout { kind, row, score_me, score_opp } => {
            let map: Map<String, Value> =
                serde_json::from_str(&row).context("Row must be a JSON object")?;
            let mut record = SessionRecord::from_wire(&map, Some(kind.into()));
            if record.date.is_none() {
                anyhow::bail!("Row needs a valid \"date\" (YYYY-MM-DD)");
            }
            // konkurranse: totalene er alltid summen av segmentene
            if let Some(totals) = record.segment_totals() {
                record.actions = totals;
            }
            let score = format_score(score_me, score_opp);
            if !score.is_empty() {
                record.score = Some(score);
            }
            let record = SessionRecord {
                created_at: record.created_at.or_else(|| Some(chrono::Utc::now())),
                ..record
            }
            .with_computed_ces();
            let ces = record.ces.unwrap_or(0);
            store.append_session(record)?;
            println!("Kamp lagret ✔ (CES {})", ces);
        }
        Commands::LogLesson { date, minutes, athlete, notes } => {
            let lesson = LessonRecord {
                athlete,
                notes,
                created_at: Some(chrono::Utc::now()),
                ..LessonRecord::new(parse_date(&date)?, minutes)
            };
            store.append_lesson(lesson)?;
            println!("Time lagret ✔");
        }
    }
    Ok(())
}
