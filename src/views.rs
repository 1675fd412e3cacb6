//! Pure row models for the two tables. Input order is preserved exactly.

use crate::locale::{DisplayZone, long_date, short_time};
use crate::records::{Match, Team};

pub const NO_TEAMS: &str = "Δεν υπάρχουν ομάδες προς εμφάνιση.";
pub const NO_MATCHES: &str = "Δεν υπάρχουν αγώνες προς εμφάνιση.";
pub const NOT_PLAYED: &str = "Match Not Played Yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRow {
    pub position: usize,
    pub name: String,
    pub label: String,
    pub points: String,
    pub won: String,
    pub lost: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Played {
        team1: String,
        team2: String,
        winner: String,
    },
    NotPlayed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub fixture: String,
    pub outcome: Outcome,
    pub location: String,
    pub date: String,
    pub time: String,
}

pub fn team_rows(teams: &[Team]) -> Vec<TeamRow> {
    teams
        .iter()
        .enumerate()
        .map(|(idx, team)| TeamRow {
            position: idx + 1,
            name: team.name.clone(),
            label: team.systima_name.clone(),
            points: format!("Points: {}", team.points),
            won: format!("Won: {}", team.matches_won),
            lost: format!("Lost: {}", team.matches_lost),
        })
        .collect()
}

pub fn match_rows(matches: &[Match], zone: DisplayZone) -> Vec<MatchRow> {
    matches.iter().map(|m| match_row(m, zone)).collect()
}

fn match_row(m: &Match, zone: DisplayZone) -> MatchRow {
    // Score and winner fields are ignored entirely until the match is completed.
    let outcome = if m.completed {
        Outcome::Played {
            team1: format!("{}: {}", m.team1, score_text(m.team1_score)),
            team2: format!("{}: {}", m.team2, score_text(m.team2_score)),
            winner: format!("Winner: {}", m.winner.as_deref().unwrap_or("-")),
        }
    } else {
        Outcome::NotPlayed
    };

    MatchRow {
        fixture: format!("{} vs {}", m.team1, m.team2),
        outcome,
        location: m.location.clone(),
        date: long_date(m.date, zone),
        time: short_time(m.date, zone),
    }
}

fn score_text(score: Option<u32>) -> String {
    score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string())
}
