use thiserror::Error;

/// A record the store handed over with a broken link. Aggregation stops at the
/// first one; the row is never skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("goal {goal_id} in match {match_id} has no linked player")]
    MissingGoalPlayer { match_id: String, goal_id: String },

    #[error("squad entry {entry_id} in match {match_id} has no linked player")]
    MissingSquadPlayer { match_id: String, entry_id: String },

    #[error("payment {payment_id} of player {player_id} has no linked event")]
    MissingPaymentEvent {
        player_id: String,
        payment_id: String,
    },
}
