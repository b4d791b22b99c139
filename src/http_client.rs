use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL};

const REQUEST_TIMEOUT_SECS: u64 = 15;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Fetches a data snapshot, defeating every HTTP cache on the way: the files
/// are regenerated in place, so a cached body may be stale. A timestamp query
/// parameter busts CDN/browser-style caches and `Cache-Control: no-cache`
/// covers the rest.
pub fn fetch_fresh_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let busted = format!("{url}{}t={}", cache_buster_separator(url), unix_millis());

    let resp = client
        .get(&busted)
        .header(ACCEPT, "application/json")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .with_context(|| format!("request failed: {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {status}: {url}"));
    }
    resp.text().context("failed reading body")
}

fn cache_buster_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
