#![allow(dead_code)]

use chrono::{DateTime, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use reqwest::StatusCode;
use volley_board::backend::FetchError;
use volley_board::locale::DisplayZone;
use volley_board::records::{Match, Team};
use volley_board::state::AppState;
use volley_board::ui;

pub fn team(id: i64, name: &str, points: u32, won: u32, lost: u32) -> Team {
    Team {
        id,
        name: name.to_string(),
        systima_name: format!("{name} VC"),
        points,
        matches_won: won,
        matches_lost: lost,
    }
}

pub fn played(id: i64, team1: &str, team2: &str, scores: (u32, u32), winner: &str) -> Match {
    Match {
        id,
        location: "Hall A".to_string(),
        date: utc("2025-01-10T18:00:00Z"),
        completed: true,
        winner: Some(winner.to_string()),
        team1: team1.to_string(),
        team2: team2.to_string(),
        team1_score: Some(scores.0),
        team2_score: Some(scores.1),
        time: None,
    }
}

pub fn unplayed(id: i64, team1: &str, team2: &str) -> Match {
    Match {
        completed: false,
        // Stale values that must stay hidden until the match is completed.
        winner: Some("Zeta".to_string()),
        team1_score: Some(7),
        team2_score: Some(9),
        ..played(id, team1, team2, (0, 0), "")
    }
}

pub fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub fn utc_zone() -> DisplayZone {
    DisplayZone::Fixed(chrono::FixedOffset::east_opt(0).expect("valid offset"))
}

pub fn unavailable() -> FetchError {
    FetchError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream down".to_string(),
    }
}

/// Renders the board into a 120x40 test terminal and returns one string per row.
pub fn render_rows(state: &AppState) -> Vec<String> {
    render_rows_sized(state, 120, 40)
}

pub fn render_rows_sized(state: &AppState, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|f| ui::draw(f, state, utc_zone()))
        .expect("draw");

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

pub fn screen_text(state: &AppState) -> String {
    render_rows(state).join("\n")
}

pub fn row_of(rows: &[String], needle: &str) -> Option<usize> {
    rows.iter().position(|row| row.contains(needle))
}
