use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub my_team: String,
    pub rival_team: String,
    pub my_pos: i32,
    pub rival_pos: i32,
    pub date: DateTime<Utc>,
    pub location: String,
    /// Own side's score. Only meaningful once `date` has passed.
    pub score_home: u32,
    pub score_away: u32,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub squad: Vec<SquadEntry>,
}

impl Match {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    pub fn result(&self) -> MatchResult {
        if self.score_home > self.score_away {
            MatchResult::Win
        } else if self.score_home < self.score_away {
            MatchResult::Loss
        } else {
            MatchResult::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    pub fn label(self) -> &'static str {
        match self {
            MatchResult::Win => "Victoria",
            MatchResult::Draw => "Empate",
            MatchResult::Loss => "Derrota",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub player_id: String,
    pub player: Option<PlayerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadEntry {
    pub id: String,
    pub player_id: String,
    pub player: Option<PlayerRef>,
}

/// Player as hydrated on a goal or squad row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
    pub dorsal: u32,
    #[serde(default)]
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub dorsal: u32,
    pub active: bool,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub payments: Vec<PaymentObligation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentObligation {
    pub id: String,
    pub event_id: String,
    pub paid: bool,
    pub event: Option<EventRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    pub id: String,
    pub name: String,
    pub cost: f64,
}
