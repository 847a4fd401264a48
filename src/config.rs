use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::FixedOffset;

use crate::store::default_db_path;
use crate::summary::{DEFAULT_UTC_OFFSET_MINUTES, StatsOptions, offset_from_minutes};

const DEFAULT_REFRESH_SECS: u64 = 60;
const MIN_REFRESH_SECS: u64 = 10;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub refresh: Duration,
    pub utc_offset_minutes: i32,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Reads `CLUBDASH_*` variables. Call after `load_dotenv`. A `db_override`
    /// (the `--db` flag) wins over `CLUBDASH_DB`.
    pub fn from_env(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match (db_override, env::var("CLUBDASH_DB")) {
            (Some(path), _) => path,
            (None, Ok(raw)) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
            _ => default_db_path().context("unable to resolve sqlite path (set CLUBDASH_DB)")?,
        };
        Ok(Self {
            db_path,
            refresh: Duration::from_secs(parse_refresh_secs(env::var("CLUBDASH_REFRESH_SECS").ok())),
            utc_offset_minutes: parse_offset_minutes(
                env::var("CLUBDASH_UTC_OFFSET_MINUTES").ok(),
            ),
            log_level: env::var("CLUBDASH_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
            log_format: parse_log_format(env::var("CLUBDASH_LOG_FORMAT").ok()),
        })
    }

    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
    }

    pub fn stats_options(&self) -> StatsOptions {
        StatsOptions {
            utc_offset: self.utc_offset(),
            ..StatsOptions::default()
        }
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

fn parse_refresh_secs(raw: Option<String>) -> u64 {
    raw.and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_REFRESH_SECS)
        .max(MIN_REFRESH_SECS)
}

fn parse_offset_minutes(raw: Option<String>) -> i32 {
    raw.and_then(|val| val.trim().parse::<i32>().ok())
        .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES)
        .clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES)
}

fn parse_log_format(raw: Option<String>) -> LogFormat {
    match raw.as_deref().map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}
