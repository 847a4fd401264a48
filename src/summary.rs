use std::collections::BTreeMap;

use chrono::{Datelike, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::locale::month_label;
use crate::model::{Match, MatchResult, PlayerRef};
use crate::ordered::OrderedTally;
use crate::partition::ClubPartition;

pub const TOP_SCORERS_LIMIT: usize = 10;
pub const MONTHLY_WINDOW: usize = 6;
/// Mexico City, where the club plays.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -360;

#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    pub top_scorers_limit: usize,
    pub monthly_window: usize,
    /// Offset used to decide which calendar month a kickoff falls in.
    pub utc_offset: FixedOffset,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_scorers_limit: TOP_SCORERS_LIMIT,
            monthly_window: MONTHLY_WINDOW,
            utc_offset: offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES),
        }
    }
}

/// Falls back to UTC when the offset is out of chrono's range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorerEntry {
    pub player_id: String,
    pub name: String,
    pub dorsal: u32,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostCalled {
    pub player_id: String,
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoals {
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    pub scored: u32,
    pub conceded: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub club_name: String,
    pub past_matches: Vec<Match>,
    pub future_matches: Vec<Match>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub top_scorers: Vec<ScorerEntry>,
    pub total_players: usize,
    pub total_matches: usize,
    pub monthly_goals: Vec<MonthlyGoals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_called: Option<MostCalled>,
}

impl ClubSummary {
    /// Whole percent, rounded half up.
    pub fn win_rate(&self) -> u32 {
        if self.total_matches == 0 {
            return 0;
        }
        (f64::from(self.wins) * 100.0 / self.total_matches as f64).round() as u32
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn goals_for_per_match(&self) -> f64 {
        per_match(self.goals_for, self.total_matches)
    }

    pub fn goals_against_per_match(&self) -> f64 {
        per_match(self.goals_against, self.total_matches)
    }

    pub fn positive_streak(&self) -> bool {
        self.wins > self.losses
    }
}

fn per_match(goals: u32, matches: usize) -> f64 {
    if matches == 0 {
        0.0
    } else {
        f64::from(goals) / matches as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SquadStats {
    pub unique_players: usize,
    pub most_called: Option<MostCalled>,
}

pub fn summarize_club(
    part: &ClubPartition<'_>,
    opts: &StatsOptions,
) -> Result<ClubSummary, StatsError> {
    let record = tally_record(&part.past);
    let top_scorers = rank_scorers(part, opts.top_scorers_limit)?;
    let squad = squad_stats(part)?;
    let monthly_goals = monthly_rollup(&part.past, opts.utc_offset, opts.monthly_window);

    Ok(ClubSummary {
        club_name: part.club_name.clone(),
        past_matches: part.past.iter().map(|m| (*m).clone()).collect(),
        future_matches: part.future.iter().map(|m| (*m).clone()).collect(),
        wins: record.wins,
        draws: record.draws,
        losses: record.losses,
        goals_for: record.goals_for,
        goals_against: record.goals_against,
        top_scorers,
        total_players: squad.unique_players,
        total_matches: part.past.len(),
        monthly_goals,
        most_called: squad.most_called,
    })
}

pub fn tally_record(past: &[&Match]) -> Record {
    let mut record = Record::default();
    for m in past {
        record.goals_for += m.score_home;
        record.goals_against += m.score_away;
        match m.result() {
            MatchResult::Win => record.wins += 1,
            MatchResult::Draw => record.draws += 1,
            MatchResult::Loss => record.losses += 1,
        }
    }
    record
}

/// Goals per player across every match of the club, most first.
/// Equal counts keep first-scored order.
pub fn rank_scorers(
    part: &ClubPartition<'_>,
    limit: usize,
) -> Result<Vec<ScorerEntry>, StatsError> {
    let mut tally: OrderedTally<String, ScorerEntry> = OrderedTally::new();
    for m in part.all_matches() {
        for goal in &m.goals {
            let player = goal
                .player
                .as_ref()
                .ok_or_else(|| StatsError::MissingGoalPlayer {
                    match_id: m.id.clone(),
                    goal_id: goal.id.clone(),
                })?;
            tally
                .entry_or_insert_with(&goal.player_id, || scorer_seed(player))
                .goals += 1;
        }
    }

    let mut rows: Vec<ScorerEntry> = tally.into_values().collect();
    // Stable: ties stay in first-seen order.
    rows.sort_by(|a, b| b.goals.cmp(&a.goals));
    rows.truncate(limit);
    Ok(rows)
}

fn scorer_seed(player: &PlayerRef) -> ScorerEntry {
    ScorerEntry {
        player_id: player.id.clone(),
        name: player.name.clone(),
        dorsal: player.dorsal,
        goals: 0,
    }
}

/// Squad appearances over past and future matches alike.
pub fn squad_stats(part: &ClubPartition<'_>) -> Result<SquadStats, StatsError> {
    let mut tally: OrderedTally<String, MostCalled> = OrderedTally::new();
    for m in part.all_matches() {
        for entry in &m.squad {
            let player = entry
                .player
                .as_ref()
                .ok_or_else(|| StatsError::MissingSquadPlayer {
                    match_id: m.id.clone(),
                    entry_id: entry.id.clone(),
                })?;
            tally
                .entry_or_insert_with(&entry.player_id, || MostCalled {
                    player_id: player.id.clone(),
                    name: player.name.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let unique_players = tally.len();
    let mut most_called: Option<MostCalled> = None;
    for row in tally.into_values() {
        if most_called.as_ref().is_none_or(|best| row.count > best.count) {
            most_called = Some(row);
        }
    }

    Ok(SquadStats {
        unique_players,
        most_called,
    })
}

/// Goals for/against per calendar month, oldest first, last `window` months.
pub fn monthly_rollup(past: &[&Match], offset: FixedOffset, window: usize) -> Vec<MonthlyGoals> {
    let mut buckets: BTreeMap<(i32, u32), (u32, u32)> = BTreeMap::new();
    for m in past {
        let local = m.date.with_timezone(&offset);
        let bucket = buckets.entry((local.year(), local.month())).or_default();
        bucket.0 += m.score_home;
        bucket.1 += m.score_away;
    }

    let skip = buckets.len().saturating_sub(window);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), (scored, conceded))| MonthlyGoals {
            month: month_label(year, month),
            year,
            month_number: month,
            scored,
            conceded,
        })
        .collect()
}
