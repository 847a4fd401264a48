use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dashboard::Snapshot;
use crate::model::{EventRef, Goal, Match, PaymentObligation, Player, PlayerRef, SquadEntry};

const APP_DIR: &str = "clubdash";
const DB_FILE: &str = "clubdash.sqlite";

/// The read side the aggregation pipeline depends on.
pub trait RecordSource {
    /// Date descending, each goal and squad entry hydrated with its player.
    fn list_matches(&self) -> Result<Vec<Match>>;
    /// Active players only, each payment hydrated with its event.
    fn list_active_players(&self) -> Result<Vec<Player>>;
}

/// One all-or-nothing read; the first failure fails the cycle.
pub fn load_snapshot(source: &impl RecordSource) -> Result<Snapshot> {
    let matches = source.list_matches().context("list matches")?;
    let active_players = source
        .list_active_players()
        .context("list active players")?;
    debug!(
        matches = matches.len(),
        players = active_players.len(),
        "snapshot loaded"
    );
    Ok(Snapshot {
        matches,
        active_players,
    })
}

impl RecordSource for Snapshot {
    fn list_matches(&self) -> Result<Vec<Match>> {
        Ok(self.matches.clone())
    }

    fn list_active_players(&self) -> Result<Vec<Player>> {
        Ok(self
            .active_players
            .iter()
            .filter(|p| p.active)
            .cloned()
            .collect())
    }
}

pub fn default_db_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(DB_FILE))
}

fn app_data_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            player_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            dorsal INTEGER NOT NULL,
            active INTEGER NOT NULL,
            positions_json TEXT NOT NULL DEFAULT '[]'
        );
        CREATE TABLE IF NOT EXISTS events (
            event_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            cost REAL NOT NULL
        );
        CREATE TABLE IF NOT EXISTS payments (
            payment_id TEXT PRIMARY KEY,
            player_id TEXT NOT NULL,
            event_id TEXT NOT NULL,
            paid INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payments_player ON payments(player_id);

        CREATE TABLE IF NOT EXISTS matches (
            match_id TEXT PRIMARY KEY,
            my_team TEXT NOT NULL,
            rival_team TEXT NOT NULL,
            my_pos INTEGER NOT NULL,
            rival_pos INTEGER NOT NULL,
            date TEXT NOT NULL,
            location TEXT NOT NULL,
            score_home INTEGER NOT NULL,
            score_away INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(date);

        CREATE TABLE IF NOT EXISTS goals (
            goal_id TEXT PRIMARY KEY,
            match_id TEXT NOT NULL,
            player_id TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_goals_match ON goals(match_id);

        CREATE TABLE IF NOT EXISTS squad_entries (
            entry_id TEXT PRIMARY KEY,
            match_id TEXT NOT NULL,
            player_id TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_squad_match ON squad_entries(match_id);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl RecordSource for SqliteStore {
    fn list_matches(&self) -> Result<Vec<Match>> {
        let mut goals = load_goals(&self.conn)?;
        let mut squads = load_squad_entries(&self.conn)?;

        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT match_id, my_team, rival_team, my_pos, rival_pos,
                       date, location, score_home, score_away
                FROM matches
                ORDER BY date DESC, rowid ASC
                "#,
            )
            .context("prepare load matches query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i32>(3)?,
                    row.get::<_, i32>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, u32>(7)?,
                    row.get::<_, u32>(8)?,
                ))
            })
            .context("query load matches")?;

        let mut out = Vec::new();
        for row in rows {
            let (id, my_team, rival_team, my_pos, rival_pos, date, location, home, away) =
                row.context("decode match row")?;
            let date = parse_timestamp(&date).with_context(|| format!("match {id}"))?;
            out.push(Match {
                goals: goals.remove(&id).unwrap_or_default(),
                squad: squads.remove(&id).unwrap_or_default(),
                id,
                my_team,
                rival_team,
                my_pos,
                rival_pos,
                date,
                location,
                score_home: home,
                score_away: away,
            });
        }
        // Text ordering breaks if offsets were stored inconsistently.
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    fn list_active_players(&self) -> Result<Vec<Player>> {
        let mut payments = load_payments(&self.conn)?;

        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT player_id, name, dorsal, active, positions_json
                FROM players
                WHERE active = 1
                ORDER BY rowid ASC
                "#,
            )
            .context("prepare load players query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, i64>(3)? != 0,
                    row.get::<_, String>(4)?,
                ))
            })
            .context("query load players")?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name, dorsal, active, positions) = row.context("decode player row")?;
            let positions = decode_positions(&positions).with_context(|| format!("player {id}"))?;
            out.push(Player {
                payments: payments.remove(&id).unwrap_or_default(),
                id,
                name,
                dorsal,
                active,
                positions,
            });
        }
        Ok(out)
    }
}

type PlayerColumns = (Option<String>, Option<String>, Option<u32>, Option<String>);

fn load_goals(conn: &Connection) -> Result<HashMap<String, Vec<Goal>>> {
    let rows = load_player_links(conn, "goals", "goal_id")?;
    let mut out: HashMap<String, Vec<Goal>> = HashMap::new();
    for (id, match_id, player_id, player) in rows {
        out.entry(match_id).or_default().push(Goal {
            id,
            player_id,
            player,
        });
    }
    Ok(out)
}

fn load_squad_entries(conn: &Connection) -> Result<HashMap<String, Vec<SquadEntry>>> {
    let rows = load_player_links(conn, "squad_entries", "entry_id")?;
    let mut out: HashMap<String, Vec<SquadEntry>> = HashMap::new();
    for (id, match_id, player_id, player) in rows {
        out.entry(match_id).or_default().push(SquadEntry {
            id,
            player_id,
            player,
        });
    }
    Ok(out)
}

/// Rows of a (row id, match id, player id) table joined to their player.
/// A dangling player id comes back as `None`.
fn load_player_links(
    conn: &Connection,
    table: &str,
    id_column: &str,
) -> Result<Vec<(String, String, String, Option<PlayerRef>)>> {
    let sql = format!(
        "SELECT t.{id_column}, t.match_id, t.player_id, p.player_id, p.name, p.dorsal, p.positions_json
         FROM {table} t
         LEFT JOIN players p ON p.player_id = t.player_id
         ORDER BY t.rowid ASC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("prepare load {table} query"))?;
    let rows = stmt
        .query_map([], |row| {
            let player: PlayerColumns = (row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?);
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                player,
            ))
        })
        .with_context(|| format!("query load {table}"))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, match_id, player_id, player) =
            row.with_context(|| format!("decode {table} row"))?;
        let player = match player {
            (Some(pid), Some(name), Some(dorsal), positions) => Some(PlayerRef {
                positions: decode_positions(positions.as_deref().unwrap_or("[]"))
                    .with_context(|| format!("player {pid}"))?,
                id: pid,
                name,
                dorsal,
            }),
            _ => None,
        };
        out.push((id, match_id, player_id, player));
    }
    Ok(out)
}

fn load_payments(conn: &Connection) -> Result<HashMap<String, Vec<PaymentObligation>>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT pay.payment_id, pay.player_id, pay.event_id, pay.paid,
                   e.event_id, e.name, e.cost
            FROM payments pay
            LEFT JOIN events e ON e.event_id = pay.event_id
            ORDER BY pay.rowid ASC
            "#,
        )
        .context("prepare load payments query")?;
    let rows = stmt
        .query_map([], |row| {
            let event = match (
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<f64>>(6)?,
            ) {
                (Some(id), Some(name), Some(cost)) => Some(EventRef { id, name, cost }),
                _ => None,
            };
            Ok((
                row.get::<_, String>(1)?,
                PaymentObligation {
                    id: row.get(0)?,
                    event_id: row.get(2)?,
                    paid: row.get::<_, i64>(3)? != 0,
                    event,
                },
            ))
        })
        .context("query load payments")?;

    let mut out: HashMap<String, Vec<PaymentObligation>> = HashMap::new();
    for row in rows {
        let (player_id, payment) = row.context("decode payment row")?;
        out.entry(player_id).or_default().push(payment);
    }
    Ok(out)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid timestamp {raw:?}: {err}"))
}

fn decode_positions(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).context("invalid positions json")
}

fn format_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Store contents in import form: rows reference each other by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub players: Vec<SeedPlayer>,
    #[serde(default)]
    pub events: Vec<SeedEvent>,
    #[serde(default)]
    pub payments: Vec<SeedPayment>,
    #[serde(default)]
    pub matches: Vec<SeedMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPlayer {
    pub id: String,
    pub name: String,
    pub dorsal: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEvent {
    pub id: String,
    pub name: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPayment {
    pub id: String,
    pub player_id: String,
    pub event_id: String,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMatch {
    pub id: String,
    pub my_team: String,
    pub rival_team: String,
    #[serde(default)]
    pub my_pos: i32,
    #[serde(default)]
    pub rival_pos: i32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub score_home: u32,
    #[serde(default)]
    pub score_away: u32,
    /// Scorer player ids, one per goal.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Called-up player ids.
    #[serde(default)]
    pub squad: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub players: usize,
    pub events: usize,
    pub payments: usize,
    pub matches: usize,
    pub goals: usize,
    pub squad_entries: usize,
}

/// Upserts every row of `seed` in one transaction. A match's goals and squad
/// are replaced wholesale.
pub fn import_seed(conn: &mut Connection, seed: &SeedFile) -> Result<ImportSummary> {
    let tx = conn.transaction().context("begin import transaction")?;
    let mut summary = ImportSummary::default();

    for p in &seed.players {
        let positions = serde_json::to_string(&p.positions).context("encode positions")?;
        tx.execute(
            r#"
            INSERT INTO players (player_id, name, dorsal, active, positions_json)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(player_id) DO UPDATE SET
                name = excluded.name,
                dorsal = excluded.dorsal,
                active = excluded.active,
                positions_json = excluded.positions_json
            "#,
            params![p.id, p.name, p.dorsal, bool_to_i64(p.active), positions],
        )
        .with_context(|| format!("upsert player {}", p.id))?;
        summary.players += 1;
    }

    for e in &seed.events {
        tx.execute(
            r#"
            INSERT INTO events (event_id, name, cost) VALUES (?1, ?2, ?3)
            ON CONFLICT(event_id) DO UPDATE SET
                name = excluded.name,
                cost = excluded.cost
            "#,
            params![e.id, e.name, e.cost],
        )
        .with_context(|| format!("upsert event {}", e.id))?;
        summary.events += 1;
    }

    for pay in &seed.payments {
        tx.execute(
            r#"
            INSERT INTO payments (payment_id, player_id, event_id, paid) VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(payment_id) DO UPDATE SET
                player_id = excluded.player_id,
                event_id = excluded.event_id,
                paid = excluded.paid
            "#,
            params![pay.id, pay.player_id, pay.event_id, bool_to_i64(pay.paid)],
        )
        .with_context(|| format!("upsert payment {}", pay.id))?;
        summary.payments += 1;
    }

    for m in &seed.matches {
        tx.execute(
            r#"
            INSERT INTO matches (
                match_id, my_team, rival_team, my_pos, rival_pos,
                date, location, score_home, score_away
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(match_id) DO UPDATE SET
                my_team = excluded.my_team,
                rival_team = excluded.rival_team,
                my_pos = excluded.my_pos,
                rival_pos = excluded.rival_pos,
                date = excluded.date,
                location = excluded.location,
                score_home = excluded.score_home,
                score_away = excluded.score_away
            "#,
            params![
                m.id,
                m.my_team,
                m.rival_team,
                m.my_pos,
                m.rival_pos,
                format_timestamp(m.date),
                m.location,
                m.score_home,
                m.score_away,
            ],
        )
        .with_context(|| format!("upsert match {}", m.id))?;
        summary.matches += 1;

        tx.execute("DELETE FROM goals WHERE match_id = ?1", params![m.id])
            .with_context(|| format!("clear goals of match {}", m.id))?;
        for (idx, player_id) in m.goals.iter().enumerate() {
            tx.execute(
                "INSERT INTO goals (goal_id, match_id, player_id) VALUES (?1, ?2, ?3)",
                params![format!("{}-g{}", m.id, idx + 1), m.id, player_id],
            )
            .with_context(|| format!("insert goal of match {}", m.id))?;
            summary.goals += 1;
        }

        tx.execute("DELETE FROM squad_entries WHERE match_id = ?1", params![m.id])
            .with_context(|| format!("clear squad of match {}", m.id))?;
        for (idx, player_id) in m.squad.iter().enumerate() {
            tx.execute(
                "INSERT INTO squad_entries (entry_id, match_id, player_id) VALUES (?1, ?2, ?3)",
                params![format!("{}-s{}", m.id, idx + 1), m.id, player_id],
            )
            .with_context(|| format!("insert squad entry of match {}", m.id))?;
            summary.squad_entries += 1;
        }
    }

    tx.commit().context("commit import transaction")?;
    info!(
        players = summary.players,
        events = summary.events,
        payments = summary.payments,
        matches = summary.matches,
        "seed imported"
    );
    Ok(summary)
}

fn bool_to_i64(v: bool) -> i64 {
    if v { 1 } else { 0 }
}
