use std::time::{Duration, Instant};

use crate::backend::FetchError;
use crate::records::{Match, Team};

pub const FADE_OUT_DELAY: Duration = Duration::from_millis(300);

pub const TEAMS_LOAD_FAILED: &str = "Failed to load teams. Please try again.";
pub const MATCHES_LOAD_FAILED: &str = "Failed to load matches. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error(String),
    Ready { teams: Vec<Team>, matches: Vec<Match> },
}

/// The loading overlay outlives `Phase::Loading` by [`FADE_OUT_DELAY`] so it can fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Shown,
    FadingOut { hide_at: Instant },
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Teams,
    Matches,
}

/// One read once it has settled. `order` is its position in settlement order
/// within a load (0 = first to finish).
#[derive(Debug)]
pub struct Settled<T> {
    pub result: Result<T, FetchError>,
    pub order: usize,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub teams: Settled<Vec<Team>>,
    pub matches: Settled<Vec<Match>>,
}

#[derive(Debug)]
pub enum Delta {
    Settled {
        generation: u64,
        outcome: LoadOutcome,
    },
}

/// What the page shows underneath the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Content {
        teams: &'a [Team],
        matches: &'a [Match],
    },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: Phase,
    pub overlay: Overlay,
    pub generation: u64,
    pub focus: Section,
    pub team_scroll: usize,
    pub match_scroll: usize,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            overlay: Overlay::Shown,
            generation: 0,
            focus: Section::Teams,
            team_scroll: 0,
            match_scroll: 0,
            help_overlay: false,
        }
    }

    /// Restarts the lifecycle from scratch and returns the generation the new
    /// load must report back with.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.overlay = Overlay::Shown;
        self.team_scroll = 0;
        self.match_scroll = 0;
        self.generation
    }

    /// Leaves `Phase::Loading`. Any failed read blanks the whole page; when
    /// both fail, the read that settled last supplies the message.
    pub fn settle(&mut self, outcome: LoadOutcome, now: Instant) {
        if self.phase != Phase::Loading {
            return;
        }

        let LoadOutcome { teams, matches } = outcome;
        let teams_order = teams.order;
        let matches_order = matches.order;

        self.phase = match (teams.result, matches.result) {
            (Ok(teams), Ok(matches)) => {
                tracing::info!(teams = teams.len(), matches = matches.len(), "board loaded");
                Phase::Ready { teams, matches }
            }
            (Err(_), Ok(_)) => Phase::Error(TEAMS_LOAD_FAILED.to_string()),
            (Ok(_), Err(_)) => Phase::Error(MATCHES_LOAD_FAILED.to_string()),
            (Err(_), Err(_)) => {
                let message = if matches_order > teams_order {
                    MATCHES_LOAD_FAILED
                } else {
                    TEAMS_LOAD_FAILED
                };
                Phase::Error(message.to_string())
            }
        };
        self.overlay = Overlay::FadingOut {
            hide_at: now + FADE_OUT_DELAY,
        };
    }

    pub fn tick(&mut self, now: Instant) {
        if let Overlay::FadingOut { hide_at } = self.overlay {
            if now >= hide_at {
                self.overlay = Overlay::Hidden;
            }
        }
    }

    /// Time left until the overlay should disappear, if it is fading.
    pub fn fade_remaining(&self, now: Instant) -> Option<Duration> {
        match self.overlay {
            Overlay::FadingOut { hide_at } => Some(hide_at.saturating_duration_since(now)),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn show_loading(&self) -> bool {
        self.overlay != Overlay::Hidden
    }

    pub fn view(&self) -> View<'_> {
        match &self.phase {
            Phase::Loading => View::Loading,
            Phase::Error(message) => View::Error(message),
            Phase::Ready { teams, matches } => View::Content { teams, matches },
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Section::Teams => Section::Matches,
            Section::Matches => Section::Teams,
        };
    }

    pub fn scroll_down(&mut self) {
        let (teams, matches) = self.row_counts();
        match self.focus {
            Section::Teams => {
                if self.team_scroll + 1 < teams {
                    self.team_scroll += 1;
                }
            }
            Section::Matches => {
                if self.match_scroll + 1 < matches {
                    self.match_scroll += 1;
                }
            }
        }
    }

    pub fn scroll_up(&mut self) {
        match self.focus {
            Section::Teams => self.team_scroll = self.team_scroll.saturating_sub(1),
            Section::Matches => self.match_scroll = self.match_scroll.saturating_sub(1),
        }
    }

    fn row_counts(&self) -> (usize, usize) {
        match &self.phase {
            Phase::Ready { teams, matches } => (teams.len(), matches.len()),
            _ => (0, 0),
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::Settled {
            generation,
            outcome,
        } => {
            if generation != state.generation {
                tracing::debug!(generation, current = state.generation, "dropping stale load");
                return;
            }
            state.settle(outcome, now);
        }
    }
}
