#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use clubdash::model::{EventRef, Goal, Match, PaymentObligation, Player, PlayerRef, SquadEntry};

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    // 18:00 UTC is midday in Mexico City, well inside the same calendar day.
    Utc.with_ymd_and_hms(y, m, d, 18, 0, 0).unwrap()
}

pub fn player_ref(id: &str, name: &str, dorsal: u32) -> PlayerRef {
    PlayerRef {
        id: id.to_string(),
        name: name.to_string(),
        dorsal,
        positions: vec!["MED".to_string()],
    }
}

pub fn fixture(id: &str, club: &str, date: DateTime<Utc>, home: u32, away: u32) -> Match {
    Match {
        id: id.to_string(),
        my_team: club.to_string(),
        rival_team: format!("Rival {id}"),
        my_pos: 3,
        rival_pos: 5,
        date,
        location: "Cancha 1".to_string(),
        score_home: home,
        score_away: away,
        goals: Vec::new(),
        squad: Vec::new(),
    }
}

pub fn with_goals(mut m: Match, scorers: &[&PlayerRef]) -> Match {
    for (idx, p) in scorers.iter().enumerate() {
        m.goals.push(Goal {
            id: format!("{}-g{}", m.id, idx + 1),
            player_id: p.id.clone(),
            player: Some((*p).clone()),
        });
    }
    m
}

pub fn with_squad(mut m: Match, players: &[&PlayerRef]) -> Match {
    for (idx, p) in players.iter().enumerate() {
        m.squad.push(SquadEntry {
            id: format!("{}-s{}", m.id, idx + 1),
            player_id: p.id.clone(),
            player: Some((*p).clone()),
        });
    }
    m
}

pub fn member(id: &str, name: &str, dorsal: u32, payments: &[(&str, f64, bool)]) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        dorsal,
        active: true,
        positions: vec!["DEF".to_string()],
        payments: payments
            .iter()
            .enumerate()
            .map(|(idx, (event, cost, paid))| PaymentObligation {
                id: format!("{id}-pay{}", idx + 1),
                event_id: format!("ev-{event}"),
                paid: *paid,
                event: Some(EventRef {
                    id: format!("ev-{event}"),
                    name: event.to_string(),
                    cost: *cost,
                }),
            })
            .collect(),
    }
}
