use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::locale::{DisplayZone, parse_utc_offset};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub backend: BackendConfig,
    pub zone: DisplayZone,
    pub log_file: Option<PathBuf>,
}

impl BoardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let url = get("SUPABASE_URL")
            .or_else(|| get("NEXT_PUBLIC_SUPABASE_URL"))
            .ok_or_else(|| anyhow!("SUPABASE_URL is not set"))?;
        let anon_key = get("SUPABASE_ANON_KEY")
            .or_else(|| get("NEXT_PUBLIC_SUPABASE_ANON_KEY"))
            .ok_or_else(|| anyhow!("SUPABASE_ANON_KEY is not set"))?;

        let timeout_secs = get("BOARD_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        let zone = match get("BOARD_UTC_OFFSET") {
            Some(raw) => DisplayZone::Fixed(
                parse_utc_offset(&raw)
                    .ok_or_else(|| anyhow!("BOARD_UTC_OFFSET {raw:?} is not an offset like +02:00"))?,
            ),
            None => DisplayZone::Local,
        };

        Ok(Self {
            backend: BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            zone,
            log_file: get("BOARD_LOG_FILE").map(PathBuf::from),
        })
    }
}
