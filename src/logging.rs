use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = "volley_board";
const LOG_FILE: &str = "volley_board.log";

/// Routes tracing to a log file. The terminal belongs to the board, so when no
/// file can be opened logging is dropped instead of written to stderr.
pub fn init_tracing(explicit: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut warnings = Vec::new();
    let opened = log_file_candidates(explicit)
        .into_iter()
        .find_map(|path| match open_log_file(&path) {
            Ok(file) => Some((path, file)),
            Err(err) => {
                warnings.push(format!("failed to open log file {}: {err}", path.display()));
                None
            }
        });

    let Some((path, file)) = opened else {
        tracing_subscriber::registry().with(env_filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();

    tracing::info!(path = %path.display(), "logging initialized");
    for warning in warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn log_file_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut candidates = Vec::new();
    if let Some(base) = non_empty_env("XDG_STATE_HOME") {
        candidates.push(PathBuf::from(base).join(LOG_DIR).join(LOG_FILE));
    }
    if let Some(home) = non_empty_env("HOME") {
        candidates.push(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(LOG_DIR)
                .join(LOG_FILE),
        );
    }
    candidates.push(std::env::temp_dir().join(LOG_DIR).join(LOG_FILE));
    candidates
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|val| !val.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_the_only_candidate() {
        let path = Path::new("/tmp/board.log");
        assert_eq!(log_file_candidates(Some(path)), vec![path.to_path_buf()]);
    }

    #[test]
    fn temp_dir_is_the_last_resort() {
        let candidates = log_file_candidates(None);
        assert_eq!(
            candidates.last(),
            Some(&std::env::temp_dir().join(LOG_DIR).join(LOG_FILE))
        );
    }
}
