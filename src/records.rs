use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub systima_name: String,
    pub points: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub location: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub winner: Option<String>,
    pub team1: String,
    pub team2: String,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    // Free-form label stored next to `date`; the board derives its clock from `date`.
    pub time: Option<String>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid {table} json: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{table} row {index}: missing field `{field}`")]
    Missing {
        table: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{table} row {index}: field `{field}` is invalid ({reason})")]
    Invalid {
        table: &'static str,
        index: usize,
        field: &'static str,
        reason: String,
    },
}

const TEAMS: &str = "teams";
const MATCHES: &str = "matches";

// Wire shapes. Every field is optional so that a bad row is reported by name
// instead of failing the whole payload with a generic serde message.
#[derive(Debug, Deserialize)]
struct TeamRow {
    id: Option<i64>,
    name: Option<String>,
    #[serde(rename = "systimaName")]
    systima_name: Option<String>,
    points: Option<Value>,
    #[serde(rename = "matchesWon")]
    matches_won: Option<Value>,
    #[serde(rename = "matchesLost")]
    matches_lost: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MatchRow {
    id: Option<i64>,
    location: Option<String>,
    date: Option<String>,
    completed: Option<bool>,
    winner: Option<String>,
    team1: Option<String>,
    team2: Option<String>,
    team1score: Option<Value>,
    team2score: Option<Value>,
    time: Option<String>,
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<Team>, SchemaError> {
    let rows: Vec<TeamRow> = decode_rows(TEAMS, raw)?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| team_from_row(index, row))
        .collect()
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>, SchemaError> {
    let rows: Vec<MatchRow> = decode_rows(MATCHES, raw)?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match_from_row(index, row))
        .collect()
}

fn decode_rows<T: for<'de> Deserialize<'de>>(
    table: &'static str,
    raw: &str,
) -> Result<Vec<T>, SchemaError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|source| SchemaError::Json { table, source })
}

fn team_from_row(index: usize, row: TeamRow) -> Result<Team, SchemaError> {
    let field = |field| SchemaError::Missing {
        table: TEAMS,
        index,
        field,
    };
    Ok(Team {
        id: row.id.ok_or_else(|| field("id"))?,
        name: row.name.ok_or_else(|| field("name"))?,
        systima_name: row.systima_name.unwrap_or_default(),
        points: count(TEAMS, index, "points", row.points.as_ref())?
            .ok_or_else(|| field("points"))?,
        matches_won: count(TEAMS, index, "matchesWon", row.matches_won.as_ref())?
            .ok_or_else(|| field("matchesWon"))?,
        matches_lost: count(TEAMS, index, "matchesLost", row.matches_lost.as_ref())?
            .ok_or_else(|| field("matchesLost"))?,
    })
}

fn match_from_row(index: usize, row: MatchRow) -> Result<Match, SchemaError> {
    let field = |field| SchemaError::Missing {
        table: MATCHES,
        index,
        field,
    };
    let raw_date = row.date.ok_or_else(|| field("date"))?;
    let date = parse_match_date(&raw_date).ok_or_else(|| SchemaError::Invalid {
        table: MATCHES,
        index,
        field: "date",
        reason: format!("unrecognised timestamp {raw_date:?}"),
    })?;

    Ok(Match {
        id: row.id.ok_or_else(|| field("id"))?,
        location: row.location.unwrap_or_default(),
        date,
        completed: row.completed.unwrap_or(false),
        winner: row.winner,
        team1: row.team1.ok_or_else(|| field("team1"))?,
        team2: row.team2.ok_or_else(|| field("team2"))?,
        team1_score: count(MATCHES, index, "team1score", row.team1score.as_ref())?,
        team2_score: count(MATCHES, index, "team2score", row.team2score.as_ref())?,
        time: row.time,
    })
}

/// Reads a non-negative integer column. `null` and absent both map to `None`.
fn count(
    table: &'static str,
    index: usize,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<u32>, SchemaError> {
    let invalid = |reason: String| SchemaError::Invalid {
        table,
        index,
        field,
        reason,
    };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let Some(n) = n.as_i64() else {
                return Err(invalid(format!("{n} is not an integer")));
            };
            u32::try_from(n)
                .map(Some)
                .map_err(|_| invalid(format!("{n} is out of range")))
        }
        Some(other) => Err(invalid(format!("expected integer, got {other}"))),
    }
}

pub fn parse_match_date(raw: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let cleaned = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres renders timestamptz with a space separator and a short offset.
    if let Ok(dt) = DateTime::parse_from_str(cleaned, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt.and_utc());
        }
    }
    None
}
