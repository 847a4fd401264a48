use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::store::{SeedEvent, SeedFile, SeedMatch, SeedPayment, SeedPlayer};

const FIRST_NAMES: &[&str] = &[
    "Luis", "Diego", "Carlos", "Jorge", "Miguel", "Andrés", "Raúl", "Iván", "Hugo", "Emilio",
    "Pablo", "Santiago", "Marco", "Óscar", "Rodrigo", "Tomás",
];
const LAST_NAMES: &[&str] = &[
    "García", "Hernández", "López", "Martínez", "Ramírez", "Torres", "Flores", "Vargas",
    "Castillo", "Morales", "Ortiz", "Reyes",
];
const RIVALS: &[&str] = &[
    "Halcones", "Pumitas", "Real Norte", "Deportivo Sur", "Atlético Lomas", "Toros FC",
    "Leones Azules", "Club Centenario",
];
const LOCATIONS: &[&str] = &["Cancha 1", "Cancha 2", "Unidad Deportiva", "Campo Tec"];
const POSITIONS: &[&str] = &["POR", "DEF", "MED", "DEL"];
const EVENTS: &[(&str, f64)] = &[
    ("Inscripción", 500.0),
    ("Torneo", 200.0),
    ("Uniforme", 150.0),
    ("Arbitraje", 80.0),
];

/// A plausible store: `clubs` teams sharing one roster of `players`, with
/// `matches_per_club` fixtures each spread weekly around `now`.
pub fn demo_seed(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    clubs: usize,
    players: usize,
    matches_per_club: usize,
) -> SeedFile {
    let mut seed = SeedFile::default();

    for idx in 0..players {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        seed.players.push(SeedPlayer {
            id: format!("p{}", idx + 1),
            name: format!("{first} {last}"),
            dorsal: (idx + 1) as u32,
            active: !rng.gen_bool(0.1),
            positions: vec![POSITIONS[rng.gen_range(0..POSITIONS.len())].to_string()],
        });
    }

    for (idx, (name, cost)) in EVENTS.iter().enumerate() {
        seed.events.push(SeedEvent {
            id: format!("e{}", idx + 1),
            name: name.to_string(),
            cost: *cost,
        });
    }

    for player in &seed.players {
        for event in &seed.events {
            if rng.gen_bool(0.6) {
                seed.payments.push(SeedPayment {
                    id: format!("pay-{}-{}", player.id, event.id),
                    player_id: player.id.clone(),
                    event_id: event.id.clone(),
                    paid: rng.gen_bool(0.7),
                });
            }
        }
    }

    let player_ids: Vec<String> = seed.players.iter().map(|p| p.id.clone()).collect();
    let past_share = matches_per_club.saturating_sub(matches_per_club / 4);
    for club_idx in 0..clubs {
        let club = if club_idx == 0 {
            "ITJaguars".to_string()
        } else {
            format!("ITJaguars {}", club_idx + 1)
        };
        for m_idx in 0..matches_per_club {
            let weeks_from_now = m_idx as i64 - past_share as i64;
            let date = now + ChronoDuration::weeks(weeks_from_now) + ChronoDuration::hours(club_idx as i64);
            let is_past = date < now;

            let squad_size = rng.gen_range(7..=player_ids.len().clamp(7, 14)).min(player_ids.len());
            let squad: Vec<String> = player_ids
                .choose_multiple(rng, squad_size)
                .cloned()
                .collect();

            let (score_home, score_away) = if is_past {
                (rng.gen_range(0..6), rng.gen_range(0..5))
            } else {
                (0, 0)
            };
            let goals = if is_past && !squad.is_empty() {
                (0..score_home)
                    .map(|_| squad[rng.gen_range(0..squad.len())].clone())
                    .collect()
            } else {
                Vec::new()
            };

            seed.matches.push(SeedMatch {
                id: format!("m{}-{}", club_idx + 1, m_idx + 1),
                my_team: club.clone(),
                rival_team: RIVALS[rng.gen_range(0..RIVALS.len())].to_string(),
                my_pos: rng.gen_range(1..=12),
                rival_pos: rng.gen_range(1..=12),
                date,
                location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string(),
                score_home,
                score_away,
                goals,
                squad,
            });
        }
    }

    seed
}
