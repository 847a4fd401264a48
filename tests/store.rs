use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;

use clubdash::dashboard::compute_dashboard;
use clubdash::demo::demo_seed;
use clubdash::error::StatsError;
use clubdash::export::export_dashboard;
use clubdash::store::{
    RecordSource, SeedEvent, SeedFile, SeedMatch, SeedPayment, SeedPlayer, SqliteStore,
    import_seed, load_snapshot,
};
use clubdash::summary::StatsOptions;

fn memory_store() -> SqliteStore {
    SqliteStore::from_connection(Connection::open_in_memory().unwrap()).unwrap()
}

fn seed_player(id: &str, name: &str, dorsal: u32, active: bool) -> SeedPlayer {
    SeedPlayer {
        id: id.to_string(),
        name: name.to_string(),
        dorsal,
        active,
        positions: vec!["DEL".to_string()],
    }
}

fn seed_match(id: &str, day: u32, goals: &[&str], squad: &[&str]) -> SeedMatch {
    SeedMatch {
        id: id.to_string(),
        my_team: "Varonil".to_string(),
        rival_team: "Halcones".to_string(),
        my_pos: 2,
        rival_pos: 6,
        date: Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap(),
        location: "Cancha 1".to_string(),
        score_home: goals.len() as u32,
        score_away: 1,
        goals: goals.iter().map(|g| g.to_string()).collect(),
        squad: squad.iter().map(|s| s.to_string()).collect(),
    }
}

fn sample_seed() -> SeedFile {
    SeedFile {
        players: vec![
            seed_player("ana", "Ana", 9, true),
            seed_player("beto", "Beto", 10, true),
            seed_player("ex", "Ex", 99, false),
        ],
        events: vec![
            SeedEvent {
                id: "torneo".to_string(),
                name: "Torneo".to_string(),
                cost: 200.0,
            },
            SeedEvent {
                id: "uniforme".to_string(),
                name: "Uniforme".to_string(),
                cost: 150.0,
            },
        ],
        payments: vec![
            SeedPayment {
                id: "pay1".to_string(),
                player_id: "ana".to_string(),
                event_id: "torneo".to_string(),
                paid: false,
            },
            SeedPayment {
                id: "pay2".to_string(),
                player_id: "ana".to_string(),
                event_id: "uniforme".to_string(),
                paid: true,
            },
            SeedPayment {
                id: "pay3".to_string(),
                player_id: "ex".to_string(),
                event_id: "torneo".to_string(),
                paid: false,
            },
        ],
        // Deliberately not in date order.
        matches: vec![
            seed_match("m1", 2, &["ana"], &["ana", "beto"]),
            seed_match("m3", 23, &[], &["beto"]),
            seed_match("m2", 9, &["beto", "beto"], &["ana", "beto"]),
        ],
    }
}

#[test]
fn import_counts_every_row() {
    let mut store = memory_store();
    let summary = import_seed(store.connection_mut(), &sample_seed()).unwrap();

    assert_eq!(summary.players, 3);
    assert_eq!(summary.events, 2);
    assert_eq!(summary.payments, 3);
    assert_eq!(summary.matches, 3);
    assert_eq!(summary.goals, 3);
    assert_eq!(summary.squad_entries, 5);
}

#[test]
fn matches_come_back_newest_first_and_hydrated() {
    let mut store = memory_store();
    import_seed(store.connection_mut(), &sample_seed()).unwrap();

    let matches = store.list_matches().unwrap();
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m3", "m2", "m1"]);

    let m2 = &matches[1];
    assert_eq!(m2.goals.len(), 2);
    assert_eq!(m2.goals[0].id, "m2-g1");
    assert_eq!(m2.goals[0].player.as_ref().unwrap().name, "Beto");
    assert_eq!(m2.squad.len(), 2);
    assert_eq!(m2.squad[0].player.as_ref().unwrap().dorsal, 9);
    assert!(matches[0].goals.is_empty());
}

#[test]
fn only_active_players_are_listed() {
    let mut store = memory_store();
    import_seed(store.connection_mut(), &sample_seed()).unwrap();

    let players = store.list_active_players().unwrap();
    let ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["ana", "beto"]);

    let ana = &players[0];
    assert_eq!(ana.payments.len(), 2);
    assert_eq!(ana.payments[0].event.as_ref().unwrap().name, "Torneo");
    assert!(ana.payments[1].paid);
    assert!(players[1].payments.is_empty());
}

#[test]
fn reimport_replaces_goals_and_squad() {
    let mut store = memory_store();
    let mut seed = sample_seed();
    import_seed(store.connection_mut(), &seed).unwrap();

    seed.matches[2].goals = vec!["ana".to_string()];
    seed.matches[2].score_home = 1;
    import_seed(store.connection_mut(), &seed).unwrap();

    let matches = store.list_matches().unwrap();
    let m2 = matches.iter().find(|m| m.id == "m2").unwrap();
    assert_eq!(m2.goals.len(), 1);
    assert_eq!(m2.goals[0].player_id, "ana");
    assert_eq!(m2.score_home, 1);
    assert_eq!(matches.len(), 3);
}

#[test]
fn snapshot_feeds_the_dashboard() {
    let mut store = memory_store();
    import_seed(store.connection_mut(), &sample_seed()).unwrap();

    let snapshot = load_snapshot(&store).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
    let dash = compute_dashboard(&snapshot, now, &StatsOptions::default()).unwrap();

    let varonil = dash.club("Varonil").unwrap();
    assert_eq!(varonil.past_matches.len(), 2);
    assert_eq!(varonil.future_matches.len(), 1);
    assert_eq!(varonil.top_scorers[0].name, "Beto");
    assert_eq!(varonil.most_called.as_ref().unwrap().name, "Beto");
    assert_eq!(varonil.most_called.as_ref().unwrap().count, 3);

    // The inactive player's debt never reaches the ledger.
    assert_eq!(dash.ledger.debts.len(), 1);
    assert_eq!(dash.ledger.debts[0].name, "Ana");
    assert_eq!(dash.ledger.total_team_debt, 200.0);
    assert_eq!(dash.ledger.total_players, 2);
}

#[test]
fn dangling_player_id_surfaces_as_error() {
    let mut store = memory_store();
    let mut seed = sample_seed();
    seed.matches[0].goals = vec!["ghost".to_string()];
    import_seed(store.connection_mut(), &seed).unwrap();

    let snapshot = load_snapshot(&store).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
    let err = compute_dashboard(&snapshot, now, &StatsOptions::default()).unwrap_err();

    assert_eq!(
        err,
        StatsError::MissingGoalPlayer {
            match_id: "m1".to_string(),
            goal_id: "m1-g1".to_string(),
        }
    );
}

#[test]
fn demo_data_round_trips_through_sqlite() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let seed = demo_seed(&mut rng, now, 2, 18, 12);

    let mut store = memory_store();
    import_seed(store.connection_mut(), &seed).unwrap();
    let snapshot = load_snapshot(&store).unwrap();

    assert_eq!(snapshot.matches.len(), 24);
    assert!(
        snapshot
            .matches
            .windows(2)
            .all(|w| w[0].date >= w[1].date)
    );
    let dash = compute_dashboard(&snapshot, now, &StatsOptions::default()).unwrap();
    assert_eq!(dash.clubs.len(), 2);
    assert!(dash.clubs.iter().all(|c| c.monthly_goals.len() <= 6));
    assert!(dash.clubs.iter().all(|c| c.top_scorers.len() <= 10));
}

#[test]
fn export_writes_a_workbook() {
    let mut store = memory_store();
    import_seed(store.connection_mut(), &sample_seed()).unwrap();
    let snapshot = load_snapshot(&store).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
    let opts = StatsOptions::default();
    let dash = compute_dashboard(&snapshot, now, &opts).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.xlsx");
    let report = export_dashboard(&path, &dash, opts.utc_offset).unwrap();

    assert_eq!(report.clubs, 1);
    assert_eq!(report.scorers, 2);
    assert_eq!(report.monthly, 1);
    assert_eq!(report.matches, 3);
    assert_eq!(report.debts, 1);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn file_backed_store_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("club.sqlite");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        import_seed(store.connection_mut(), &sample_seed()).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.list_matches().unwrap().len(), 3);
}
