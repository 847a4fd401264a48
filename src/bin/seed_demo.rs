use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use clubdash::config::{self, Config};
use clubdash::demo::demo_seed;
use clubdash::logging;
use clubdash::store::{SqliteStore, import_seed};

/// Fills the database with synthetic clubs, matches and payments.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long)]
    db: Option<PathBuf>,
    #[arg(long, default_value_t = 2)]
    clubs: usize,
    #[arg(long, default_value_t = 20)]
    players: usize,
    #[arg(long, default_value_t = 16)]
    matches: usize,
}

fn main() -> Result<()> {
    config::load_dotenv();
    let args = Args::parse();
    let cfg = Config::from_env(args.db)?;
    logging::init(&cfg.log_level, cfg.log_format);

    let mut rng = rand::thread_rng();
    let seed = demo_seed(&mut rng, Utc::now(), args.clubs, args.players, args.matches);

    let mut store = SqliteStore::open(&cfg.db_path)?;
    let summary = import_seed(store.connection_mut(), &seed)?;

    println!("Demo data written");
    println!("DB: {}", cfg.db_path.display());
    println!(
        "Players: {} | Matches: {} | Goals: {} | Payments: {}",
        summary.players, summary.matches, summary.goals, summary.payments
    );
    Ok(())
}
