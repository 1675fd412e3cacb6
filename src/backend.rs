use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::http_client::{ClientBuildError, backend_client};
use crate::records::{Match, SchemaError, Team, parse_matches_json, parse_teams_json};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{0} read panicked")]
    Panicked(&'static str),
}

/// The two reads the board is built from. Both return the full collection in
/// server order; callers must not re-sort.
pub trait BoardSource: Send + Sync {
    fn list_teams(&self) -> Result<Vec<Team>, FetchError>;
    fn list_matches(&self) -> Result<Vec<Match>, FetchError>;
}

/// PostgREST tables as exposed by the hosted Supabase project.
pub struct SupabaseSource {
    client: Client,
    base_url: String,
}

impl SupabaseSource {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientBuildError> {
        Ok(Self {
            client: backend_client(&config.anon_key, config.timeout)?,
            base_url: config.url.clone(),
        })
    }

    pub fn teams_url(&self) -> String {
        table_url(&self.base_url, "teams", "points")
    }

    pub fn matches_url(&self) -> String {
        table_url(&self.base_url, "matches", "date")
    }

    fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(FetchError::Status { status, body });
        }
        Ok(body)
    }
}

impl BoardSource for SupabaseSource {
    fn list_teams(&self) -> Result<Vec<Team>, FetchError> {
        let body = self.fetch_body(&self.teams_url())?;
        Ok(parse_teams_json(&body)?)
    }

    fn list_matches(&self) -> Result<Vec<Match>, FetchError> {
        let body = self.fetch_body(&self.matches_url())?;
        Ok(parse_matches_json(&body)?)
    }
}

fn table_url(base: &str, table: &str, order_desc: &str) -> String {
    format!("{base}/rest/v1/{table}?select=*&order={order_desc}.desc")
}
