use std::collections::HashMap;
use std::env;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::http_client::fetch_fresh_text;
use crate::player::{normalize_player, Player};
use crate::profiles::Profile;
use crate::sanitize::clean_json_text;

const BASE_URL_ENV: &str = "PFI_DATA_BASE_URL";

/// Transport seam for the loader. Production goes through the shared
/// blocking client; tests substitute a canned fetcher and count calls.
pub trait Fetcher {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        fetch_fresh_text(url)
    }
}

/// Row-level drop diagnostics. The silent-drop contract stands; these counts
/// exist so observability and tests can see how lossy a load was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub records_seen: usize,
    pub records_accepted: usize,
}

/// What a profile selection resolves to. Dataset-level failures surface here
/// as an error value; nothing is thrown past the loader boundary.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub players: Vec<Player>,
    pub error: Option<String>,
    pub from_cache: bool,
    pub stats: LoadStats,
}

/// Issued at request start; a response may only commit to the cache while its
/// ticket is still the latest one for that profile. Rapid profile switching
/// can otherwise let a slow stale response overwrite a newer load.
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    profile: Profile,
    seq: u64,
}

pub struct DatasetStore {
    fetcher: Box<dyn Fetcher>,
    base_url: String,
    cache: HashMap<Profile, Vec<Player>>,
    latest: HashMap<Profile, u64>,
    next_seq: u64,
}

impl DatasetStore {
    pub fn new(fetcher: Box<dyn Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            cache: HashMap::new(),
            latest: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn with_http(base_url: impl Into<String>) -> Self {
        Self::new(Box::new(HttpFetcher), base_url)
    }

    pub fn base_url_from_env() -> Option<String> {
        env::var(BASE_URL_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Loads a profile dataset, preferring the in-memory cache. Failed loads
    /// are never cached, so re-selecting the profile retries the fetch.
    pub fn load(&mut self, profile: Profile) -> LoadOutcome {
        if let Some(players) = self.cache.get(&profile) {
            debug!("cache hit for {} ({} players)", profile.label(), players.len());
            let n = players.len();
            return LoadOutcome {
                players: players.clone(),
                error: None,
                from_cache: true,
                stats: LoadStats {
                    records_seen: n,
                    records_accepted: n,
                },
            };
        }

        let ticket = self.begin_load(profile);
        match self.fetch_profile_players(profile) {
            Ok((players, stats)) => {
                log_load_summary(profile, &players, stats);
                self.finish_load(ticket, players.clone());
                LoadOutcome {
                    players,
                    error: None,
                    from_cache: false,
                    stats,
                }
            }
            Err(err) => {
                warn!("load failed for {}: {err:#}", profile.label());
                LoadOutcome {
                    players: Vec::new(),
                    error: Some(format!("{err:#}")),
                    from_cache: false,
                    stats: LoadStats::default(),
                }
            }
        }
    }

    /// Network + sanitize + parse + normalize, no store mutation. An empty
    /// post-validation list counts as a dataset-level failure.
    pub fn fetch_profile_players(&self, profile: Profile) -> Result<(Vec<Player>, LoadStats)> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            profile.resource_name()
        );
        let raw = self.fetcher.fetch_text(&url)?;
        let (players, stats) = parse_profile_players(&raw, profile)?;
        if players.is_empty() {
            return Err(anyhow!(
                "no valid players in {} after normalization",
                profile.label()
            ));
        }
        Ok((players, stats))
    }

    pub fn begin_load(&mut self, profile: Profile) -> LoadTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest.insert(profile, seq);
        LoadTicket { profile, seq }
    }

    /// Commits a finished load unless a newer request for the same profile
    /// was issued in the meantime; stale results are dropped on the floor.
    pub fn finish_load(&mut self, ticket: LoadTicket, players: Vec<Player>) -> bool {
        if self.latest.get(&ticket.profile) != Some(&ticket.seq) {
            debug!("discarding stale load for {}", ticket.profile.label());
            return false;
        }
        self.cache.insert(ticket.profile, players);
        true
    }

    pub fn cached(&self, profile: Profile) -> Option<&[Player]> {
        self.cache.get(&profile).map(Vec::as_slice)
    }

    pub fn invalidate(&mut self, profile: Profile) {
        self.cache.remove(&profile);
    }
}

/// Sanitizes and parses one PFI payload into canonical players, dropping
/// invalid rows.
pub fn parse_profile_players(raw: &str, profile: Profile) -> Result<(Vec<Player>, LoadStats)> {
    let cleaned = clean_json_text(raw);
    let rows: Vec<Map<String, Value>> = serde_json::from_str(&cleaned)
        .with_context(|| format!("invalid pfi json for {}", profile.label()))?;

    let records_seen = rows.len();
    let players: Vec<Player> = rows
        .iter()
        .filter_map(|row| normalize_player(row, profile))
        .collect();
    let stats = LoadStats {
        records_seen,
        records_accepted: players.len(),
    };
    Ok((players, stats))
}

fn log_load_summary(profile: Profile, players: &[Player], stats: LoadStats) {
    if players.is_empty() {
        return;
    }
    let mean_fit = players.iter().map(|p| p.fit_index).sum::<f64>() / players.len() as f64;
    debug!(
        "loaded {}: {}/{} rows kept, first={}, last={}, mean fit {:.1}",
        profile.label(),
        stats.records_accepted,
        stats.records_seen,
        players[0].name,
        players[players.len() - 1].name,
        mean_fit,
    );
}
