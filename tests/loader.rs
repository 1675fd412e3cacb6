use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use volley_board::backend::{BoardSource, FetchError};
use volley_board::loader::{load_board, spawn_load};
use volley_board::records::{Match, Team};
use volley_board::state::Delta;

mod common;
use common::{played, team, unavailable};

/// Each read waits (bounded) until both reads are in flight, so a sequential
/// loader would be observed as `overlapped == false`.
struct OverlapSource {
    in_flight: AtomicUsize,
    overlapped: AtomicUsize,
    fail_teams: bool,
    teams_delay: Duration,
}

impl OverlapSource {
    fn new(fail_teams: bool, teams_delay: Duration) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            overlapped: AtomicUsize::new(0),
            fail_teams,
            teams_delay,
        }
    }

    fn rendezvous(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.in_flight.load(Ordering::SeqCst) >= 2 {
                self.overlapped.fetch_add(1, Ordering::SeqCst);
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl BoardSource for OverlapSource {
    fn list_teams(&self) -> Result<Vec<Team>, FetchError> {
        self.rendezvous();
        thread::sleep(self.teams_delay);
        if self.fail_teams {
            return Err(unavailable());
        }
        Ok(vec![team(1, "Alpha", 10, 5, 1), team(2, "Beta", 8, 4, 2)])
    }

    fn list_matches(&self) -> Result<Vec<Match>, FetchError> {
        self.rendezvous();
        Ok(vec![played(1, "Alpha", "Beta", (3, 1), "Alpha")])
    }
}

#[test]
fn both_reads_run_concurrently_and_settle() {
    let source = OverlapSource::new(false, Duration::ZERO);
    let outcome = load_board(&source);

    assert_eq!(source.overlapped.load(Ordering::SeqCst), 2);
    let teams = outcome.teams.result.expect("teams should load");
    assert_eq!(teams[0].name, "Alpha");
    assert_eq!(teams[1].name, "Beta");
    assert_eq!(outcome.matches.result.expect("matches should load").len(), 1);

    let mut orders = [outcome.teams.order, outcome.matches.order];
    orders.sort();
    assert_eq!(orders, [0, 1]);
}

#[test]
fn a_failing_read_does_not_cancel_the_other() {
    let source = OverlapSource::new(true, Duration::from_millis(50));
    let outcome = load_board(&source);

    assert!(outcome.teams.result.is_err());
    assert!(outcome.matches.result.is_ok());
    // The slow teams read settles after the matches read.
    assert_eq!(outcome.teams.order, 1);
    assert_eq!(outcome.matches.order, 0);
}

#[test]
fn spawned_load_reports_its_generation() {
    let (tx, rx) = mpsc::channel();
    let source = Arc::new(OverlapSource::new(false, Duration::ZERO));
    let handle = spawn_load(source, 7, tx);
    assert_eq!(handle.generation(), 7);

    let delta = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("load should settle");
    let Delta::Settled {
        generation,
        outcome,
    } = delta;
    assert_eq!(generation, 7);
    assert!(outcome.teams.result.is_ok());
    assert!(outcome.matches.result.is_ok());
}

/// Blocks both reads until the test opens the gate.
struct GatedSource {
    gate: Mutex<mpsc::Receiver<()>>,
    opened: AtomicUsize,
}

impl GatedSource {
    fn wait(&self) {
        let gate = self.gate.lock().expect("gate lock");
        if self.opened.load(Ordering::SeqCst) == 0 {
            let _ = gate.recv_timeout(Duration::from_secs(5));
            self.opened.store(1, Ordering::SeqCst);
        }
    }
}

impl BoardSource for GatedSource {
    fn list_teams(&self) -> Result<Vec<Team>, FetchError> {
        self.wait();
        Ok(Vec::new())
    }

    fn list_matches(&self) -> Result<Vec<Match>, FetchError> {
        self.wait();
        Ok(Vec::new())
    }
}

#[test]
fn dropping_the_handle_discards_the_outcome() {
    let (gate_tx, gate_rx) = mpsc::channel();
    let source = Arc::new(GatedSource {
        gate: Mutex::new(gate_rx),
        opened: AtomicUsize::new(0),
    });

    let (tx, rx) = mpsc::channel();
    let handle = spawn_load(source, 1, tx);
    drop(handle);
    gate_tx.send(()).expect("gate open");

    // The worker owns the only sender, so the channel closes without a delta.
    assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
}
