use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::debts::{DebtLedger, build_debt_ledger};
use crate::error::StatsError;
use crate::model::{Match, Player};
use crate::partition::partition_clubs;
use crate::summary::{ClubSummary, StatsOptions, summarize_club};

/// Everything one computation cycle reads from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Date descending, goals and squad hydrated.
    pub matches: Vec<Match>,
    /// Payments hydrated with their events.
    pub active_players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub clubs: Vec<ClubSummary>,
    pub ledger: DebtLedger,
}

impl Dashboard {
    pub fn club(&self, name: &str) -> Option<&ClubSummary> {
        self.clubs.iter().find(|c| c.club_name == name)
    }
}

pub fn compute_dashboard(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    opts: &StatsOptions,
) -> Result<Dashboard, StatsError> {
    let clubs = partition_clubs(&snapshot.matches, now)
        .iter()
        .map(|part| summarize_club(part, opts))
        .collect::<Result<Vec<_>, _>>()?;
    let ledger = build_debt_ledger(&snapshot.active_players)?;

    debug!(
        clubs = clubs.len(),
        matches = snapshot.matches.len(),
        debtors = ledger.debtors(),
        total_team_debt = ledger.total_team_debt,
        "dashboard computed"
    );

    Ok(Dashboard {
        generated_at: now,
        clubs,
        ledger,
    })
}
