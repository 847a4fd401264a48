mod common;

use clubdash::debts::build_debt_ledger;
use clubdash::error::StatsError;

use common::member;

#[test]
fn unpaid_obligations_add_up() {
    let players = vec![member(
        "p",
        "P",
        8,
        &[("Torneo", 200.0, false), ("Uniforme", 150.0, false), ("Arbitraje", 100.0, true)],
    )];

    let ledger = build_debt_ledger(&players).unwrap();

    assert_eq!(ledger.debts.len(), 1);
    let entry = &ledger.debts[0];
    assert_eq!(entry.name, "P");
    assert_eq!(entry.dorsal, 8);
    assert_eq!(entry.total_debt, 350.0);
    assert_eq!(entry.events, vec!["Torneo".to_string(), "Uniforme".to_string()]);
    assert_eq!(ledger.total_team_debt, 350.0);
    assert_eq!(ledger.total_players, 1);
}

#[test]
fn nobody_owes_anything() {
    let players = vec![
        member("a", "A", 1, &[("Torneo", 200.0, true)]),
        member("b", "B", 2, &[]),
    ];

    let ledger = build_debt_ledger(&players).unwrap();

    assert!(ledger.debts.is_empty());
    assert_eq!(ledger.total_team_debt, 0.0);
    assert_eq!(ledger.total_players, 2);
    assert_eq!(ledger.players_in_good_standing(), 2);
    assert_eq!(ledger.average_debt(), 0.0);
}

#[test]
fn empty_roster_is_not_an_error() {
    let ledger = build_debt_ledger(&[]).unwrap();
    assert!(ledger.debts.is_empty());
    assert_eq!(ledger.total_players, 0);
}

#[test]
fn sorted_by_debt_with_stable_ties() {
    let players = vec![
        member("a", "Ana", 1, &[("Torneo", 200.0, false)]),
        member("b", "Beto", 2, &[("Inscripción", 500.0, false)]),
        member("c", "Caro", 3, &[("Uniforme", 150.0, false), ("Arbitraje", 50.0, false)]),
        member("d", "Dani", 4, &[("Arbitraje", 80.0, false)]),
    ];

    let ledger = build_debt_ledger(&players).unwrap();

    let order: Vec<&str> = ledger.debts.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(order, vec!["Beto", "Ana", "Caro", "Dani"]);
    assert!(
        ledger
            .debts
            .windows(2)
            .all(|w| w[0].total_debt >= w[1].total_debt)
    );
    let sum: f64 = ledger.debts.iter().map(|d| d.total_debt).sum();
    assert_eq!(ledger.total_team_debt, sum);
    assert_eq!(ledger.total_team_debt, 980.0);
    assert_eq!(ledger.average_debt(), 245.0);
}

#[test]
fn inactive_players_are_ignored() {
    let mut gone = member("x", "Ex", 99, &[("Torneo", 200.0, false)]);
    gone.active = false;
    let players = vec![gone, member("a", "Ana", 1, &[("Torneo", 200.0, false)])];

    let ledger = build_debt_ledger(&players).unwrap();

    assert_eq!(ledger.total_players, 1);
    assert_eq!(ledger.debts.len(), 1);
    assert_eq!(ledger.debts[0].name, "Ana");
}

#[test]
fn zero_cost_obligations_do_not_make_a_debtor() {
    let players = vec![
        member("a", "Ana", 1, &[("Amistoso", 0.0, false)]),
        member("b", "Beto", 2, &[("Torneo", 200.0, false)]),
        member("c", "Caro", 3, &[]),
    ];

    let ledger = build_debt_ledger(&players).unwrap();

    assert_eq!(ledger.debts.len(), 1);
    assert!(ledger.debts.iter().all(|d| d.total_debt > 0.0));
    assert_eq!(ledger.players_in_good_standing(), 2);
}

#[test]
fn repeated_event_names_are_kept() {
    let players = vec![member(
        "a",
        "Ana",
        1,
        &[("Arbitraje", 80.0, false), ("Arbitraje", 80.0, false)],
    )];

    let ledger = build_debt_ledger(&players).unwrap();

    assert_eq!(ledger.debts[0].events, vec!["Arbitraje", "Arbitraje"]);
    assert_eq!(ledger.debts[0].total_debt, 160.0);
}

#[test]
fn unpaid_obligation_without_event_is_an_error() {
    let mut p = member("a", "Ana", 1, &[("Torneo", 200.0, false)]);
    p.payments[0].event = None;

    let err = build_debt_ledger(&[p]).unwrap_err();
    assert_eq!(
        err,
        StatsError::MissingPaymentEvent {
            player_id: "a".to_string(),
            payment_id: "a-pay1".to_string(),
        }
    );
}
