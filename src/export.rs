use std::path::Path;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dashboard::Dashboard;
use crate::locale::format_datetime;

pub struct ExportReport {
    pub clubs: usize,
    pub scorers: usize,
    pub monthly: usize,
    pub matches: usize,
    pub debts: usize,
}

pub fn export_dashboard(
    path: &Path,
    dashboard: &Dashboard,
    offset: FixedOffset,
) -> Result<ExportReport> {
    let mut clubs_rows = vec![header(&[
        "Club",
        "Played",
        "Wins",
        "Draws",
        "Losses",
        "Win %",
        "Goals For",
        "Goals Against",
        "Goal Diff",
        "Players",
        "Most Called",
        "Call-ups",
        "Upcoming",
    ])];
    let mut scorer_rows = vec![header(&["Club", "Rank", "Player", "Dorsal", "Goals"])];
    let mut monthly_rows = vec![header(&["Club", "Month", "Scored", "Conceded"])];
    let mut match_rows = vec![header(&[
        "Club", "Match ID", "Date", "Rival", "Location", "Status", "Score", "Squad",
    ])];

    for club in &dashboard.clubs {
        clubs_rows.push(vec![
            club.club_name.clone(),
            club.total_matches.to_string(),
            club.wins.to_string(),
            club.draws.to_string(),
            club.losses.to_string(),
            club.win_rate().to_string(),
            club.goals_for.to_string(),
            club.goals_against.to_string(),
            club.goal_difference().to_string(),
            club.total_players.to_string(),
            club.most_called
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            club.most_called
                .as_ref()
                .map(|m| m.count.to_string())
                .unwrap_or_default(),
            club.future_matches.len().to_string(),
        ]);

        for (idx, scorer) in club.top_scorers.iter().enumerate() {
            scorer_rows.push(vec![
                club.club_name.clone(),
                (idx + 1).to_string(),
                scorer.name.clone(),
                scorer.dorsal.to_string(),
                scorer.goals.to_string(),
            ]);
        }

        for bucket in &club.monthly_goals {
            monthly_rows.push(vec![
                club.club_name.clone(),
                bucket.month.clone(),
                bucket.scored.to_string(),
                bucket.conceded.to_string(),
            ]);
        }

        for m in &club.past_matches {
            match_rows.push(vec![
                club.club_name.clone(),
                m.id.clone(),
                format_datetime(m.date, offset),
                m.rival_team.clone(),
                m.location.clone(),
                m.result().label().to_string(),
                format!("{}-{}", m.score_home, m.score_away),
                m.squad.len().to_string(),
            ]);
        }
        for m in &club.future_matches {
            match_rows.push(vec![
                club.club_name.clone(),
                m.id.clone(),
                format_datetime(m.date, offset),
                m.rival_team.clone(),
                m.location.clone(),
                "Próximo".to_string(),
                String::new(),
                m.squad.len().to_string(),
            ]);
        }
    }

    let mut debt_rows = vec![header(&["Player", "Dorsal", "Total Debt", "Events"])];
    for debt in &dashboard.ledger.debts {
        debt_rows.push(vec![
            debt.name.clone(),
            debt.dorsal.to_string(),
            format!("{:.2}", debt.total_debt),
            debt.events.join(", "),
        ]);
    }
    debt_rows.push(vec![
        "TOTAL".to_string(),
        String::new(),
        format!("{:.2}", dashboard.ledger.total_team_debt),
        String::new(),
    ]);

    let report = ExportReport {
        clubs: clubs_rows.len() - 1,
        scorers: scorer_rows.len() - 1,
        monthly: monthly_rows.len() - 1,
        matches: match_rows.len() - 1,
        debts: dashboard.ledger.debts.len(),
    };

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Clubs", &clubs_rows),
        ("Scorers", &scorer_rows),
        ("Monthly", &monthly_rows),
        ("Matches", &match_rows),
        ("Debts", &debt_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(name)
            .with_context(|| format!("name sheet {name}"))?;
        write_rows(sheet, rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(report)
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
