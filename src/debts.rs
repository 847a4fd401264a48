use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::Player;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntry {
    pub player_id: String,
    pub name: String,
    pub dorsal: u32,
    pub total_debt: f64,
    /// Names of the unpaid events in obligation order; repeats are kept.
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtLedger {
    pub debts: Vec<DebtEntry>,
    pub total_team_debt: f64,
    /// Active players overall, debtors included.
    pub total_players: usize,
}

impl DebtLedger {
    pub fn debtors(&self) -> usize {
        self.debts.len()
    }

    pub fn players_in_good_standing(&self) -> usize {
        self.total_players.saturating_sub(self.debts.len())
    }

    pub fn average_debt(&self) -> f64 {
        if self.debts.is_empty() {
            0.0
        } else {
            self.total_team_debt / self.debts.len() as f64
        }
    }
}

/// Unpaid balances of active players, largest first.
///
/// Players whose unpaid total is not strictly positive are left out. Equal
/// totals keep input order.
pub fn build_debt_ledger(players: &[Player]) -> Result<DebtLedger, StatsError> {
    let active: Vec<&Player> = players.iter().filter(|p| p.active).collect();

    let mut debts = Vec::new();
    for player in &active {
        if let Some(entry) = debt_entry(player)? {
            debts.push(entry);
        }
    }
    debts.sort_by(|a, b| b.total_debt.total_cmp(&a.total_debt));

    let total_team_debt = debts.iter().map(|d| d.total_debt).sum();

    Ok(DebtLedger {
        debts,
        total_team_debt,
        total_players: active.len(),
    })
}

fn debt_entry(player: &Player) -> Result<Option<DebtEntry>, StatsError> {
    let mut total_debt = 0.0;
    let mut events = Vec::new();
    for payment in player.payments.iter().filter(|p| !p.paid) {
        let event = payment
            .event
            .as_ref()
            .ok_or_else(|| StatsError::MissingPaymentEvent {
                player_id: player.id.clone(),
                payment_id: payment.id.clone(),
            })?;
        total_debt += event.cost;
        events.push(event.name.clone());
    }

    if total_debt > 0.0 {
        Ok(Some(DebtEntry {
            player_id: player.id.clone(),
            name: player.name.clone(),
            dorsal: player.dorsal,
            total_debt,
            events,
        }))
    } else {
        Ok(None)
    }
}
