use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use crate::backend::{BoardSource, FetchError};
use crate::state::{Delta, LoadOutcome, Settled};

/// Ties an in-flight load to the page that started it. Dropping the handle
/// cancels the load: its outcome is never delivered.
#[derive(Debug)]
pub struct LoadHandle {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl LoadHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs both reads concurrently and returns once both have settled. A failing
/// read never short-circuits the other one.
pub fn load_board(source: &dyn BoardSource) -> LoadOutcome {
    let settled = AtomicUsize::new(0);

    thread::scope(|scope| {
        let teams = scope.spawn(|| {
            let result = source.list_teams();
            if let Err(err) = &result {
                log_failure("teams", err);
            }
            Settled {
                result,
                order: settled.fetch_add(1, Ordering::SeqCst),
            }
        });
        let matches = scope.spawn(|| {
            let result = source.list_matches();
            if let Err(err) = &result {
                log_failure("matches", err);
            }
            Settled {
                result,
                order: settled.fetch_add(1, Ordering::SeqCst),
            }
        });

        LoadOutcome {
            teams: join_read(teams, "teams"),
            matches: join_read(matches, "matches"),
        }
    })
}

/// Starts a load on a worker thread and reports it on `tx` tagged with `generation`.
pub fn spawn_load(
    source: Arc<dyn BoardSource>,
    generation: u64,
    tx: Sender<Delta>,
) -> LoadHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    thread::spawn(move || {
        tracing::info!(generation, "loading board");
        let outcome = load_board(source.as_ref());
        if flag.load(Ordering::SeqCst) {
            tracing::debug!(generation, "load cancelled, discarding outcome");
            return;
        }
        if tx.send(Delta::Settled { generation, outcome }).is_err() {
            tracing::debug!(generation, "board closed before load settled");
        }
    });

    LoadHandle {
        generation,
        cancelled,
    }
}

fn log_failure(table: &str, err: &FetchError) {
    tracing::error!(error = %err, "Error fetching {table}");
}

// A panicking read is reported as settled-last so the page still leaves loading.
fn join_read<T>(
    handle: thread::ScopedJoinHandle<'_, Settled<T>>,
    table: &'static str,
) -> Settled<T> {
    match handle.join() {
        Ok(settled) => settled,
        Err(_) => {
            tracing::error!("Error fetching {table}: read panicked");
            Settled {
                result: Err(FetchError::Panicked(table)),
                order: usize::MAX,
            }
        }
    }
}
