use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use clubdash::config::{self, Config};
use clubdash::dashboard::{Dashboard, compute_dashboard};
use clubdash::export::export_dashboard;
use clubdash::logging;
use clubdash::report::render_report;
use clubdash::store::{SeedFile, SqliteStore, import_seed, load_snapshot};

#[derive(Debug, Parser)]
#[command(name = "clubdash", about = "Club performance and payment dashboard")]
struct Cli {
    /// SQLite database (overrides CLUBDASH_DB).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the dashboard.
    Report {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Evaluation instant (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Recompute every refresh interval until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Write the dashboard to an .xlsx workbook.
    Export {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Load a JSON seed file into the database.
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();
    let cfg = Config::from_env(cli.db)?;
    logging::init(&cfg.log_level, cfg.log_format);

    let command = cli.command.unwrap_or(Command::Report {
        json: false,
        now: None,
        watch: false,
    });
    match command {
        Command::Report { json, now, watch } => run_report(&cfg, json, now, watch),
        Command::Export { out, now } => run_export(&cfg, &out, now),
        Command::Import { file } => run_import(&cfg, &file),
    }
}

fn run_report(cfg: &Config, json: bool, now: Option<DateTime<Utc>>, watch: bool) -> Result<()> {
    if !watch {
        let dashboard = compute_cycle(cfg, now.unwrap_or_else(Utc::now))?;
        return print_dashboard(cfg, &dashboard, json);
    }

    info!(interval_secs = cfg.refresh.as_secs(), "watching dashboard");
    loop {
        match compute_cycle(cfg, now.unwrap_or_else(Utc::now)) {
            Ok(dashboard) => print_dashboard(cfg, &dashboard, json)?,
            Err(err) => {
                let error = format!("{err:#}");
                warn!(%error, "dashboard cycle failed");
            }
        }
        thread::sleep(cfg.refresh);
    }
}

fn compute_cycle(cfg: &Config, now: DateTime<Utc>) -> Result<Dashboard> {
    let store = SqliteStore::open(&cfg.db_path)?;
    let snapshot = load_snapshot(&store)?;
    let dashboard = compute_dashboard(&snapshot, now, &cfg.stats_options())
        .context("aggregate dashboard")?;
    info!(
        clubs = dashboard.clubs.len(),
        debtors = dashboard.ledger.debtors(),
        "dashboard refreshed"
    );
    Ok(dashboard)
}

fn print_dashboard(cfg: &Config, dashboard: &Dashboard, json: bool) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(dashboard).context("serialize dashboard")?;
        println!("{body}");
    } else {
        print!("{}", render_report(dashboard, cfg.utc_offset()));
    }
    Ok(())
}

fn run_export(cfg: &Config, out: &Path, now: Option<DateTime<Utc>>) -> Result<()> {
    let dashboard = compute_cycle(cfg, now.unwrap_or_else(Utc::now))?;
    let report = export_dashboard(out, &dashboard, cfg.utc_offset())?;
    println!("Export complete: {}", out.display());
    println!(
        "Clubs: {} | Scorers: {} | Months: {} | Matches: {} | Debtors: {}",
        report.clubs, report.scorers, report.monthly, report.matches, report.debts
    );
    Ok(())
}

fn run_import(cfg: &Config, file: &Path) -> Result<()> {
    let raw =
        fs::read_to_string(file).with_context(|| format!("read seed file {}", file.display()))?;
    let seed: SeedFile = serde_json::from_str(&raw).context("invalid seed json")?;
    let mut store = SqliteStore::open(&cfg.db_path)?;
    let summary = import_seed(store.connection_mut(), &seed)?;

    println!("Import complete");
    println!("DB: {}", cfg.db_path.display());
    println!(
        "Players: {} | Events: {} | Payments: {} | Matches: {} | Goals: {} | Squad entries: {}",
        summary.players,
        summary.events,
        summary.payments,
        summary.matches,
        summary.goals,
        summary.squad_entries
    );
    Ok(())
}
