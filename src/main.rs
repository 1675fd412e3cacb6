use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use volley_board::backend::{BoardSource, SupabaseSource};
use volley_board::config::BoardConfig;
use volley_board::loader::{LoadHandle, spawn_load};
use volley_board::locale::DisplayZone;
use volley_board::logging::init_tracing;
use volley_board::state::{AppState, Delta, apply_delta};
use volley_board::ui;

struct App {
    state: AppState,
    zone: DisplayZone,
    source: Arc<dyn BoardSource>,
    tx: mpsc::Sender<Delta>,
    load: Option<LoadHandle>,
    should_quit: bool,
}

impl App {
    fn new(source: Arc<dyn BoardSource>, zone: DisplayZone, tx: mpsc::Sender<Delta>) -> Self {
        Self {
            state: AppState::new(),
            zone,
            source,
            tx,
            load: None,
            should_quit: false,
        }
    }

    /// Full reload: the previous load (if any) is cancelled by dropping its handle.
    fn reload(&mut self) {
        if let Some(previous) = self.load.take() {
            tracing::info!(generation = previous.generation(), "cancelling load for reload");
        }
        let generation = self.state.begin_load();
        self.load = Some(spawn_load(
            Arc::clone(&self.source),
            generation,
            self.tx.clone(),
        ));
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            KeyCode::Tab => self.state.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = BoardConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_file.as_deref());
    let source = SupabaseSource::new(&config.backend).context("failed to set up backend client")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(Arc::new(source), config.zone, tx);
    app.reload();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    exit_status(res)
}

// Called once the terminal is restored; an error here means a non-zero exit.
fn exit_status(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(error = %err, "board exited with an error");
    }
    res.context("terminal board failed")
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        let now = Instant::now();
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta, now);
        }
        app.state.tick(now);

        terminal.draw(|f| ui::draw(f, &app.state, app.zone))?;

        // Wake up in time to drop the overlay once its fade deadline passes.
        let timeout = app
            .state
            .fade_remaining(Instant::now())
            .map_or(tick_rate, |left| left.min(tick_rate));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
