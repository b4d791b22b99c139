use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dataset::Fetcher;
use crate::sanitize::{clean_json_text, strip_known_prefix};

pub const ROSTER_RESOURCE: &str = "PFI_SJE_M_HAWKVIEW_FINAL_CON_POBLETE.json";

/// Declared positions the midfield board actually shows; roster rows playing
/// none of these are filtered out.
const VALID_POSITIONS: [&str; 6] = ["DMF", "AMF", "LCMF", "RCMF", "LDMF", "RWB"];

/// One row of the team roster export. Fixed shape, unlike the per-profile PFI
/// files: nine raw per-90 metrics plus their weighted score counterparts.
/// Numerics are `Option` because sanitized NaN tokens arrive as null.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterPlayer {
    #[serde(rename = "Jugador", default)]
    pub name: String,
    #[serde(rename = "Edad")]
    pub age: Option<f64>,
    #[serde(rename = "Equipo")]
    pub club: Option<String>,
    #[serde(rename = "Nacionalidad")]
    pub nationality: Option<String>,
    #[serde(rename = "Posición")]
    pub position: Option<String>,
    #[serde(rename = "Valor de mercado")]
    pub market_value: Option<f64>,
    #[serde(rename = "PFI_SJE_M")]
    pub fit_score: Option<f64>,

    #[serde(rename = "Pases progresivos/90")]
    pub progressive_passes: Option<f64>,
    #[serde(rename = "Carreras en progresión/90")]
    pub progression_runs: Option<f64>,
    #[serde(rename = "Pases en el último tercio/90")]
    pub final_third_passes: Option<f64>,
    #[serde(rename = "Remates/90")]
    pub shots: Option<f64>,
    #[serde(rename = "xG/90")]
    pub xg: Option<f64>,
    #[serde(rename = "Acciones defensivas realizadas/90")]
    pub defensive_actions: Option<f64>,
    #[serde(rename = "Duelos defensivos/90")]
    pub defensive_duels: Option<f64>,
    #[serde(rename = "Duelos/90")]
    pub duels: Option<f64>,
    #[serde(rename = "Faltas recibidas/90")]
    pub fouls_drawn: Option<f64>,

    #[serde(rename = "Pases progresivos/90_score")]
    pub progressive_passes_score: Option<f64>,
    #[serde(rename = "Carreras en progresión/90_score")]
    pub progression_runs_score: Option<f64>,
    #[serde(rename = "Pases en el último tercio/90_score")]
    pub final_third_passes_score: Option<f64>,
    #[serde(rename = "Remates/90_score")]
    pub shots_score: Option<f64>,
    #[serde(rename = "xG/90_score")]
    pub xg_score: Option<f64>,
    #[serde(rename = "Acciones defensivas realizadas/90_score")]
    pub defensive_actions_score: Option<f64>,
    #[serde(rename = "Duelos defensivos/90_score")]
    pub defensive_duels_score: Option<f64>,
    #[serde(rename = "Duelos/90_score")]
    pub duels_score: Option<f64>,
    #[serde(rename = "Faltas recibidas/90_score")]
    pub fouls_drawn_score: Option<f64>,
}

impl RosterPlayer {
    /// The position column can hold a comma-separated list ("DMF, LCMF").
    pub fn plays_valid_position(&self) -> bool {
        let Some(position) = self.position.as_deref() else {
            return false;
        };
        position
            .split(',')
            .map(str::trim)
            .any(|p| VALID_POSITIONS.contains(&p))
    }
}

/// Parses the roster export: strips the known leading garbage token, repairs
/// non-finite literals, deduplicates by player name (first occurrence wins)
/// and keeps only valid-position players.
pub fn parse_roster_json(raw: &str) -> Result<Vec<RosterPlayer>> {
    let cleaned = clean_json_text(strip_known_prefix(raw));
    let rows: Vec<RosterPlayer> =
        serde_json::from_str(&cleaned).context("invalid roster json")?;

    let mut seen = HashSet::new();
    Ok(rows
        .into_iter()
        .filter(|row| !row.name.is_empty())
        .filter(|row| seen.insert(row.name.clone()))
        .filter(RosterPlayer::plays_valid_position)
        .collect())
}

pub fn fetch_roster(fetcher: &dyn Fetcher, base_url: &str) -> Result<Vec<RosterPlayer>> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), ROSTER_RESOURCE);
    let raw = fetcher.fetch_text(&url)?;
    parse_roster_json(&raw)
}
