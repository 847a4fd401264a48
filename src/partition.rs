use chrono::{DateTime, Utc};

use crate::model::Match;
use crate::ordered::OrderedTally;

/// One club's matches split around the evaluation instant.
#[derive(Debug, Clone)]
pub struct ClubPartition<'a> {
    pub club_name: String,
    /// Every match of the club in loader order.
    pub matches: Vec<&'a Match>,
    /// Most recent first.
    pub past: Vec<&'a Match>,
    /// Soonest first.
    pub future: Vec<&'a Match>,
}

impl<'a> ClubPartition<'a> {
    pub fn all_matches(&self) -> impl Iterator<Item = &'a Match> + '_ {
        self.matches.iter().copied()
    }
}

/// Groups `matches` (loader order: date descending) by own-team name.
///
/// Clubs come out in order of first appearance. A match at exactly `now`
/// counts as future. Nothing is re-sorted: past keeps the loader order and
/// future is that order reversed.
pub fn partition_clubs(matches: &[Match], now: DateTime<Utc>) -> Vec<ClubPartition<'_>> {
    let mut clubs: OrderedTally<String, ClubPartition<'_>> = OrderedTally::new();
    for m in matches {
        let part = clubs.entry_or_insert_with(&m.my_team, || ClubPartition {
            club_name: m.my_team.clone(),
            matches: Vec::new(),
            past: Vec::new(),
            future: Vec::new(),
        });
        part.matches.push(m);
        if m.is_past(now) {
            part.past.push(m);
        } else {
            part.future.push(m);
        }
    }

    clubs
        .into_values()
        .map(|mut part| {
            part.future.reverse();
            part
        })
        .collect()
}
