//! CSV export of match results.

use crate::logic::round_label;
use crate::models::{MatchView, Qualifier, Team, Tournament};
use serde::Serialize;

#[derive(Serialize)]
struct ResultRow<'a> {
    round: u32,
    round_name: String,
    match_index: u32,
    team1: &'a str,
    team2: &'a str,
    score1: Option<u32>,
    score2: Option<u32>,
    winner: &'a str,
}

fn team_name(team: &Option<Team>) -> &str {
    team.as_ref().map_or("TBD", |t| t.name.as_str())
}

fn row(m: &MatchView, round_name: String) -> ResultRow<'_> {
    ResultRow {
        round: m.round,
        round_name,
        match_index: m.match_index,
        team1: team_name(&m.team1),
        team2: team_name(&m.team2),
        score1: m.score1,
        score2: m.score2,
        winner: m.winner.as_ref().map_or("", |t| t.name.as_str()),
    }
}

fn write_rows<'a>(rows: impl Iterator<Item = ResultRow<'a>>) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in rows {
        writer.serialize(r)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// One row per match, ordered by round then match index. Unknown teams show as `TBD`.
pub fn tournament_csv(tournament: &Tournament) -> Result<Vec<u8>, csv::Error> {
    let total_rounds = tournament.total_rounds();
    let mut view = tournament.view();
    view.matches.sort_by_key(|m| (m.round, m.match_index));
    write_rows(
        view.matches
            .iter()
            .map(|m| row(m, round_label(m.round, total_rounds))),
    )
}

pub fn qualifier_csv(qualifier: &Qualifier) -> Result<Vec<u8>, csv::Error> {
    let mut view = qualifier.view();
    view.matches.sort_by_key(|m| m.match_index);
    write_rows(
        view.matches
            .iter()
            .map(|m| row(m, "Qualifier".to_string())),
    )
}
