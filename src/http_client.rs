use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;

const AGENT: &str = concat!("volley_board/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("anon key is not a valid header value")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Builds the blocking client used for every backend read. The anon key goes
/// into the default headers so individual requests only carry their URL.
pub fn backend_client(anon_key: &str, timeout: Duration) -> Result<Client, ClientBuildError> {
    let mut headers = HeaderMap::new();
    let mut key = HeaderValue::from_str(anon_key)?;
    key.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))?;
    bearer.set_sensitive(true);
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}
