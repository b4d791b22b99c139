use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;

use crate::levenshtein::levenshtein;
use crate::profiles::Profile;
use crate::sanitize::clean_json_text;
use crate::text_norm::canonical_name;

/// Widest edit distance still accepted as "the same player". The radar files
/// are produced independently of the PFI files and spell names slightly
/// differently (accents, abbreviations); 2 recovers those without pairing up
/// genuinely distinct short names.
const MAX_NAME_DISTANCE: usize = 2;

const RADAR_DIR_DEFAULT: &str = "assets/radar";

/// One row of a per-profile radar dataset: a player plus their 0-1 normalized
/// chart values. Values sanitized from NaN arrive as null, hence `Option`.
#[derive(Debug, Clone, Deserialize)]
pub struct RadarRecord {
    #[serde(rename = "Jugador")]
    pub name: String,
    #[serde(rename = "Valores", default)]
    pub values: HashMap<String, Option<f64>>,
}

/// Resolves a player against a radar dataset by name.
///
/// Exact canonical-name match wins first (input order breaks ties); otherwise
/// the closest candidate by edit distance is taken when it is within
/// `MAX_NAME_DISTANCE`. `None` means "no radar data", an expected outcome the
/// caller renders as a placeholder.
pub fn find_radar_player<'a>(
    candidates: &'a [RadarRecord],
    query_name: &str,
) -> Option<&'a RadarRecord> {
    let query = canonical_name(query_name);

    if let Some(exact) = candidates
        .iter()
        .find(|record| canonical_name(&record.name) == query)
    {
        return Some(exact);
    }

    let mut best: Option<(&RadarRecord, usize)> = None;
    for record in candidates {
        let dist = levenshtein(&query, &canonical_name(&record.name));
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((record, dist));
        }
    }

    match best {
        Some((record, dist)) if dist <= MAX_NAME_DISTANCE => Some(record),
        _ => None,
    }
}

pub fn parse_radar_json(raw: &str) -> Result<Vec<RadarRecord>> {
    let cleaned = clean_json_text(raw);
    serde_json::from_str(&cleaned).context("invalid radar json")
}

/// Per-profile radar datasets, loaded once from disk and read-only afterwards.
#[derive(Debug, Default)]
pub struct RadarRegistry {
    by_profile: HashMap<Profile, Vec<RadarRecord>>,
}

impl RadarRegistry {
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut by_profile = HashMap::new();
        for profile in Profile::ALL {
            let path = dir.join(format!("radar_{}.json", profile.key()));
            let records = match fs::read_to_string(&path) {
                Ok(raw) => match parse_radar_json(&raw) {
                    Ok(records) => records,
                    Err(err) => {
                        warn!("skipping radar file {}: {err:#}", path.display());
                        Vec::new()
                    }
                },
                // A missing radar file just means no chart data for that
                // profile.
                Err(_) => Vec::new(),
            };
            by_profile.insert(profile, records);
        }
        Self { by_profile }
    }

    pub fn records(&self, profile: Profile) -> &[RadarRecord] {
        self.by_profile
            .get(&profile)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find(&self, profile: Profile, player_name: &str) -> Option<&RadarRecord> {
        find_radar_player(self.records(profile), player_name)
    }
}

pub fn global_registry() -> &'static RadarRegistry {
    static REGISTRY: OnceLock<RadarRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| RadarRegistry::load_from_dir(&radar_dir()))
}

fn radar_dir() -> PathBuf {
    match env::var("PFI_RADAR_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => PathBuf::from(RADAR_DIR_DEFAULT),
    }
}
