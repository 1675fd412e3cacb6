use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::FixedOffset;
use volley_board::locale::DisplayZone;
use volley_board::records::{parse_matches_json, parse_teams_json};
use volley_board::views::{match_rows, team_rows};

fn teams_payload(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":{i},"name":"Team {i}","systimaName":"Δήμος {i}","points":{},"matchesWon":{},"matchesLost":{}}}"#,
                (n - i) * 3,
                n - i,
                i
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn matches_payload(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            let completed = i % 3 != 0;
            format!(
                r#"{{"id":{i},"location":"Hall {}","date":"2025-01-{:02}T18:00:00+00:00","completed":{completed},"winner":"Team {i}","team1":"Team {i}","team2":"Team {}","team1score":3,"team2score":{},"time":"20:00"}}"#,
                i % 4,
                1 + (i % 28),
                i + 1,
                i % 3
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let teams = teams_payload(64);
    let matches = matches_payload(256);

    c.bench_function("parse_teams_64", |b| {
        b.iter(|| parse_teams_json(black_box(&teams)).expect("valid payload"))
    });
    c.bench_function("parse_matches_256", |b| {
        b.iter(|| parse_matches_json(black_box(&matches)).expect("valid payload"))
    });
}

fn bench_rows(c: &mut Criterion) {
    let teams = parse_teams_json(&teams_payload(64)).expect("valid payload");
    let matches = parse_matches_json(&matches_payload(256)).expect("valid payload");
    let zone = DisplayZone::Fixed(FixedOffset::east_opt(2 * 3600).expect("valid offset"));

    c.bench_function("team_rows_64", |b| b.iter(|| team_rows(black_box(&teams))));
    c.bench_function("match_rows_256", |b| {
        b.iter(|| match_rows(black_box(&matches), zone))
    });
}

criterion_group!(benches, bench_parse, bench_rows);
criterion_main!(benches);
