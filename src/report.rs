use std::fmt::Write as _;

use chrono::FixedOffset;

use crate::dashboard::Dashboard;
use crate::debts::DebtLedger;
use crate::locale::{format_currency, format_datetime, format_signed};
use crate::model::Match;
use crate::summary::ClubSummary;

const UPCOMING_SHOWN: usize = 3;
const RESULTS_SHOWN: usize = 5;

/// Plain-text rendering of a dashboard, one block per club then the shared
/// debt table.
pub fn render_report(dashboard: &Dashboard, offset: FixedOffset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ITJAGUARS FC - Dashboard de estadísticas del equipo");
    let _ = writeln!(out);

    if dashboard.clubs.is_empty() {
        let _ = writeln!(out, "No hay datos de clubes");
    }
    for club in &dashboard.clubs {
        render_club(&mut out, club, offset);
        let _ = writeln!(out);
    }

    render_debts(&mut out, &dashboard.ledger);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Última actualización: {}",
        format_datetime(dashboard.generated_at, offset)
    );
    out
}

fn render_club(out: &mut String, club: &ClubSummary, offset: FixedOffset) {
    let _ = writeln!(out, "== {} ==", club.club_name);
    let _ = writeln!(
        out,
        "Partidos jugados: {} ({}V - {}E - {}D)",
        club.total_matches, club.wins, club.draws, club.losses
    );
    let _ = writeln!(
        out,
        "Tasa de victoria: {}% ({})",
        club.win_rate(),
        if club.positive_streak() {
            "Racha positiva"
        } else {
            "A mejorar"
        }
    );
    let _ = writeln!(
        out,
        "Goles: {} - {} (Diferencia: {})",
        club.goals_for,
        club.goals_against,
        format_signed(club.goal_difference())
    );
    let _ = writeln!(
        out,
        "Por partido: {:.1} a favor, {:.1} en contra",
        club.goals_for_per_match(),
        club.goals_against_per_match()
    );
    match &club.most_called {
        Some(mvp) => {
            let _ = writeln!(
                out,
                "Jugadores activos: {} (MVP: {}, {} convocatorias)",
                club.total_players, mvp.name, mvp.count
            );
        }
        None => {
            let _ = writeln!(out, "Jugadores activos: {}", club.total_players);
        }
    }

    let _ = writeln!(out, "-- Próximos partidos ({})", club.future_matches.len());
    if club.future_matches.is_empty() {
        let _ = writeln!(out, "   No hay partidos programados");
    }
    for m in club.future_matches.iter().take(UPCOMING_SHOWN) {
        let _ = writeln!(out, "   {}", fixture_line(m, offset, false));
    }

    let _ = writeln!(out, "-- Últimos resultados ({} total)", club.past_matches.len());
    if club.past_matches.is_empty() {
        let _ = writeln!(out, "   No hay partidos registrados");
    }
    for m in club.past_matches.iter().take(RESULTS_SHOWN) {
        let _ = writeln!(out, "   {}", fixture_line(m, offset, true));
    }

    let _ = writeln!(out, "-- Tabla de goleo");
    if club.top_scorers.is_empty() {
        let _ = writeln!(out, "   No hay goles registrados");
    }
    for (idx, scorer) in club.top_scorers.iter().enumerate() {
        let _ = writeln!(
            out,
            "   {:>2}. #{:<3} {:<24} {}",
            idx + 1,
            scorer.dorsal,
            scorer.name,
            scorer.goals
        );
    }

    let _ = writeln!(out, "-- Goles por mes");
    if club.monthly_goals.is_empty() {
        let _ = writeln!(out, "   Sin datos disponibles");
    }
    for bucket in &club.monthly_goals {
        let _ = writeln!(
            out,
            "   {:<8} a favor {:>3}  en contra {:>3}",
            bucket.month, bucket.scored, bucket.conceded
        );
    }
}

fn fixture_line(m: &Match, offset: FixedOffset, past: bool) -> String {
    let when = format_datetime(m.date, offset);
    if past {
        format!(
            "{when} | {} {}-{} {} | {} | {}",
            m.my_team,
            m.score_home,
            m.score_away,
            m.rival_team,
            m.result().label(),
            m.location
        )
    } else {
        format!(
            "{when} | {} (#{}) vs {} (#{}) | {} | Convocados: {}",
            m.my_team,
            m.my_pos,
            m.rival_team,
            m.rival_pos,
            m.location,
            m.squad.len()
        )
    }
}

fn render_debts(out: &mut String, ledger: &DebtLedger) {
    let _ = writeln!(out, "== Tabla de deudas (todos los clubes) ==");
    if ledger.debts.is_empty() {
        let _ = writeln!(out, "¡Todos al corriente! No hay deudas pendientes");
    }
    for debt in &ledger.debts {
        let _ = writeln!(
            out,
            "   #{:<3} {:<24} {:>12}  [{}]",
            debt.dorsal,
            debt.name,
            format_currency(debt.total_debt),
            debt.events.join(", ")
        );
    }
    let _ = writeln!(
        out,
        "Deuda total del equipo: {}",
        format_currency(ledger.total_team_debt)
    );
    let _ = writeln!(out, "Jugadores con deuda: {}", ledger.debtors());
    let _ = writeln!(out, "Jugadores al corriente: {}", ledger.players_in_good_standing());
    let _ = writeln!(
        out,
        "Deuda promedio: {}",
        format_currency(ledger.average_debt())
    );
}
