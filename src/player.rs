use std::collections::BTreeMap;

use log::warn;
use serde_json::{Map, Value};

use crate::profiles::Profile;

const DEFAULT_AGE: u8 = 25;
const YOUNG_SENTINEL_AGE: u8 = 22;
const MIN_AGE: f64 = 16.0;
const MAX_AGE: f64 = 45.0;

/// Ordered fallback chain for the competition/provenance field. The exports
/// disagree on what to call it; first non-empty wins.
const COMPETITION_FIELDS: [&str; 4] = ["Fuente", "Procedencia", "Liga", "Campeonato"];

/// Canonical player record. Every constructed `Player` has a non-empty name
/// and a fit index > 0; raw rows violating that are dropped, not repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub age: u8,
    pub market_value: String,
    pub club: String,
    pub competition: String,
    pub profile: String,
    pub fit_index: f64,
    pub metrics: BTreeMap<String, Option<f64>>,
}

/// Maps one raw dataset row into a canonical `Player`.
///
/// Returns `None` for structurally invalid rows (no name, no fit-index value,
/// fit index <= 0 after rescaling). Bad rows must not abort the rest of the
/// dataset, so rejection is a silent drop apart from a `warn!`.
pub fn normalize_player(raw: &Map<String, Value>, profile: Profile) -> Option<Player> {
    let name = match raw.get("Jugador").and_then(Value::as_str) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            warn!("dropping row without a player name ({})", profile.label());
            return None;
        }
    };

    let fit_field = profile.fit_field();
    let Some(raw_fit) = raw.get(fit_field).and_then(lenient_f64) else {
        warn!("dropping {name}: no {fit_field} value");
        return None;
    };
    // Some profiles publish the fit index on a 0-1 scale, others 0-100.
    // The scale is inferred by magnitude; a genuine 0-100 score of exactly
    // 1.0 would be misread, but the data contract carries no explicit flag.
    let fit_index = if raw_fit <= 1.0 { raw_fit * 100.0 } else { raw_fit };
    if fit_index <= 0.0 {
        warn!("dropping {name}: fit index {fit_index} is not positive");
        return None;
    }

    let age = resolve_age(raw.get("Edad"));

    let competition = COMPETITION_FIELDS
        .iter()
        .find_map(|field| raw.get(*field).and_then(display_text))
        .unwrap_or_else(|| "not specified".to_string());

    let market_value = raw
        .get("Valor de mercado (Transfermarkt)")
        .and_then(display_text)
        .or_else(|| raw.get("valor_mercado").and_then(display_text))
        .unwrap_or_else(|| "not available".to_string());

    let club = raw
        .get("Equipo")
        .and_then(display_text)
        .or_else(|| raw.get("club").and_then(display_text))
        .unwrap_or_else(|| "no club".to_string());

    let mut metrics = BTreeMap::new();
    // Profile metrics under their display names, looked up via the norm_
    // source keys.
    for display in profile.metrics() {
        let source_key = profile.metric_source_key(display);
        metrics.insert(
            (*display).to_string(),
            raw.get(&source_key).and_then(lenient_f64),
        );
    }
    // Copy through everything else under its raw key so fields this
    // normalizer does not model stay available downstream. norm_ columns are
    // always kept, consumed or not. Raw keys win over the display-name
    // entries above when they collide, matching source precedence.
    for (key, value) in raw {
        let consumed = key == "Jugador"
            || key == "Edad"
            || key == "Equipo"
            || key == "Valor de mercado (Transfermarkt)"
            || key == "Procedencia"
            || key == "Fuente"
            || key == fit_field;
        if consumed && !key.starts_with("norm_") {
            continue;
        }
        metrics.insert(key.clone(), lenient_f64(value));
    }

    Some(Player {
        name,
        age,
        market_value,
        club,
        competition,
        profile: profile.label().to_string(),
        fit_index,
        metrics,
    })
}

fn resolve_age(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::String(s)) if s == "Joven" => YOUNG_SENTINEL_AGE,
        Some(v) => match finite_f64(v) {
            Some(n) if n != 0.0 => n.clamp(MIN_AGE, MAX_AGE) as u8,
            _ => DEFAULT_AGE,
        },
        None => DEFAULT_AGE,
    }
}

fn finite_f64(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Numeric value of a JSON field, tolerating numbers-as-strings the way the
/// exports sometimes deliver them. Non-finite and non-numeric yield `None`.
fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => finite_f64(value),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
