use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::locale::DisplayZone;
use crate::records::{Match, Team};
use crate::state::{AppState, Section, View};
use crate::views::{self, MatchRow, NO_MATCHES, NO_TEAMS, Outcome, TeamRow};

pub const TITLE: &str = "Τουρνουά Βόλλει";
pub const REGION: &str = "Περιφέρεια Ανατολικής Αττικής";
pub const SEASON: &str = "2024-2025";
pub const LOADING_TEXT: &str = "Φόρτωση δεδομένων...";
pub const RETRY_TEXT: &str = "Προσπάθησε ξανά (r)";

const ORANGE: Color = Color::Rgb(249, 115, 22);
const MATCH_ROW_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, state: &AppState, zone: DisplayZone) {
    let area = frame.size();
    match state.view() {
        View::Loading => {}
        View::Error(message) => render_error(frame, area, message),
        View::Content { teams, matches } => render_board(frame, area, state, teams, matches, zone),
    }

    if state.show_loading() {
        render_loading(frame, area, state.loading());
    }
    if state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn render_board(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    teams: &[Team],
    matches: &[Match],
    zone: DisplayZone,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(MATCH_ROW_HEIGHT + 3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_teams(
        frame,
        chunks[1],
        &views::team_rows(teams),
        state.team_scroll,
        state.focus == Section::Teams,
    );
    render_matches(
        frame,
        chunks[2],
        &views::match_rows(matches, zone),
        state.match_scroll,
        state.focus == Section::Matches,
    );

    let footer = Paragraph::new("Tab Section | j/k/↑/↓ Scroll | r Reload | ? Help | q Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let banner = Style::default().fg(Color::White).bg(ORANGE);
    let lines = vec![
        Line::from(Span::styled(TITLE, banner.add_modifier(Modifier::BOLD))),
        Line::from(REGION),
        Line::from(SEASON),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(banner);
    frame.render_widget(header, area);
}

fn section_block(title: &str, subtitle: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(ORANGE)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .title(format!(" {title} · {subtitle} "))
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_teams(frame: &mut Frame, area: Rect, rows: &[TeamRow], scroll: usize, focused: bool) {
    let block = section_block("Κατάταξη", "Αναλυτικά αποτελέσματα των ομάδων", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rows.is_empty() {
        render_empty(frame, inner, NO_TEAMS);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = scroll_window(scroll, rows.len(), visible);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::DarkGray);

    for (i, row) in rows[start..end].iter().enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(team_columns())
            .split(row_area);

        render_cell_text(frame, cols[0], &format!("{}.", row.position), muted);
        render_cell_text(frame, cols[1], &row.name, bold);
        render_cell_text(frame, cols[2], &row.label, muted);
        let stats = format!("{}  {}  {}", row.points, row.won, row.lost);
        render_cell_text(frame, cols[3], &stats, Style::default());
    }
}

fn render_matches(frame: &mut Frame, area: Rect, rows: &[MatchRow], scroll: usize, focused: bool) {
    let block = section_block("Αγώνες", "Πρόγραμμα και αποτελέσματα αγώνων", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rows.is_empty() {
        render_empty(frame, inner, NO_MATCHES);
        return;
    }
    if inner.height < MATCH_ROW_HEIGHT {
        render_empty(frame, inner, "Match list needs more height");
        return;
    }

    let visible = (inner.height / MATCH_ROW_HEIGHT) as usize;
    let (start, end) = scroll_window(scroll, rows.len(), visible);

    for (i, row) in rows[start..end].iter().enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + (i as u16) * MATCH_ROW_HEIGHT,
            width: inner.width,
            height: MATCH_ROW_HEIGHT,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(match_columns())
            .split(row_area);

        let fixture = Paragraph::new(row.fixture.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        frame.render_widget(fixture, cols[0]);

        let outcome = match &row.outcome {
            Outcome::Played {
                team1,
                team2,
                winner,
            } => Paragraph::new(vec![
                Line::from(team1.as_str()),
                Line::from(team2.as_str()),
                Line::from(Span::styled(
                    winner.as_str(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
            ]),
            Outcome::NotPlayed => Paragraph::new(views::NOT_PLAYED).style(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        frame.render_widget(outcome, cols[1]);

        let details = Paragraph::new(vec![
            Line::from(row.location.as_str()),
            Line::from(row.date.as_str()),
            Line::from(row.time.as_str()),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        frame.render_widget(details, cols[2]);
    }
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(60, 30, area);
    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            RETRY_TEXT,
            Style::default().fg(Color::White).bg(ORANGE),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, popup);
}

// While loading the overlay covers everything; once settled it shrinks to a
// dimmed line until the fade deadline passes.
fn render_loading(frame: &mut Frame, area: Rect, loading: bool) {
    let target = if loading {
        area
    } else {
        centered_line(area, LOADING_TEXT.chars().count() as u16 + 4)
    };
    frame.render_widget(Clear, target);

    let style = if loading {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    let text_area = centered_line(target, target.width);
    let overlay = Paragraph::new(LOADING_TEXT)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(overlay, text_area);
}

fn render_empty(frame: &mut Frame, area: Rect, text: &str) {
    let empty = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(empty, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Volley Board - Help",
        "",
        "  Tab          Switch section",
        "  j/k or ↑/↓   Scroll",
        "  r            Reload",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn team_columns() -> [Constraint; 4] {
    [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Min(24),
    ]
}

// The details column must fit the longest Greek date ("Παρασκευή 10 Σεπτεμβρίου 2025").
fn match_columns() -> [Constraint; 3] {
    [
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Min(31),
    ]
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn scroll_window(scroll: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    let max_start = total.saturating_sub(visible);
    let start = scroll.min(max_start);
    (start, (start + visible).min(total))
}

fn centered_line(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height / 2,
        width,
        height: area.height.min(1),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_window_clamps_to_the_tail() {
        assert_eq!(scroll_window(0, 10, 4), (0, 4));
        assert_eq!(scroll_window(8, 10, 4), (6, 10));
        assert_eq!(scroll_window(3, 2, 4), (0, 2));
        assert_eq!(scroll_window(0, 0, 4), (0, 0));
    }
}
