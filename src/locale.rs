//! Greek (el-GR) date and time rendering for match rows.

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike, Utc, Weekday};

const WEEKDAYS: [&str; 7] = [
    "Δευτέρα",
    "Τρίτη",
    "Τετάρτη",
    "Πέμπτη",
    "Παρασκευή",
    "Σάββατο",
    "Κυριακή",
];

// Genitive forms, as used after a day number ("10 Ιανουαρίου").
const MONTHS: [&str; 12] = [
    "Ιανουαρίου",
    "Φεβρουαρίου",
    "Μαρτίου",
    "Απριλίου",
    "Μαΐου",
    "Ιουνίου",
    "Ιουλίου",
    "Αυγούστου",
    "Σεπτεμβρίου",
    "Οκτωβρίου",
    "Νοεμβρίου",
    "Δεκεμβρίου",
];

const AM: &str = "π.μ.";
const PM: &str = "μ.μ.";

/// Wall clock the board displays match times in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn localize(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Local => at.with_timezone(&Local).fixed_offset(),
            DisplayZone::Fixed(offset) => at.with_timezone(offset),
        }
    }
}

/// `Παρασκευή 10 Ιανουαρίου 2025`
pub fn long_date(at: DateTime<Utc>, zone: DisplayZone) -> String {
    let local = zone.localize(at);
    format!(
        "{} {} {} {}",
        weekday_name(local.weekday()),
        local.day(),
        MONTHS[local.month0() as usize],
        local.year()
    )
}

/// `08:00 μ.μ.` (12-hour clock, two-digit hour and minute)
pub fn short_time(at: DateTime<Utc>, zone: DisplayZone) -> String {
    let local = zone.localize(at);
    let (pm, hour) = local.hour12();
    let period = if pm { PM } else { AM };
    format!("{hour:02}:{:02} {period}", local.minute())
}

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Parses `+02:00`, `-0330`, `+3` or `Z` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let cleaned = raw.trim();
    if cleaned.eq_ignore_ascii_case("z") || cleaned.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match cleaned.chars().next()? {
        '+' => (1, &cleaned[1..]),
        '-' => (-1, &cleaned[1..]),
        _ => return None,
    };
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}
