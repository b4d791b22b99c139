use std::collections::HashMap;

use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub mean: f64,
}

/// Fit-index-weighted mean of a metric over a cohort. Players without a
/// finite value for the metric are absent, not zero; a missing weight falls
/// back to 1. Returns 0 when no player carries the metric.
pub fn weighted_mean(players: &[Player], metric: &str) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for player in players {
        let Some(value) = metric_value(player, metric) else {
            continue;
        };
        let weight = if player.fit_index > 0.0 {
            player.fit_index
        } else {
            1.0
        };
        weighted_sum += value * weight;
        weight_sum += weight;
    }
    if weight_sum == 0.0 {
        return 0.0;
    }
    weighted_sum / weight_sum
}

/// Min/max per metric over the cohort's finite values. No values at all
/// defaults to [0, 1]; an all-equal cohort is widened so the range stays
/// divisible for normalization.
pub fn value_ranges(players: &[Player], metrics: &[&str]) -> HashMap<String, MetricRange> {
    let mut ranges = HashMap::new();
    for metric in metrics {
        let values = metric_values(players, metric);
        let range = if values.is_empty() {
            MetricRange { min: 0.0, max: 1.0 }
        } else {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let (min, max) = widen_if_degenerate(min, max);
            MetricRange { min, max }
        };
        ranges.insert((*metric).to_string(), range);
    }
    ranges
}

/// Linear map of `value` into [0, 1] over a range, clamping first. Callers
/// must pass a widened range: `max - min` is assumed non-zero.
pub fn normalize_in_range(value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.clamp(min, max);
    (clamped - min) / (max - min)
}

/// Descriptive statistics per metric: range (widened when degenerate),
/// nearest-rank 25th/75th percentiles and arithmetic mean over the finite
/// values. An empty cohort gets fixed placeholder stats.
pub fn metric_statistics(players: &[Player], metrics: &[&str]) -> HashMap<String, MetricStats> {
    let mut stats = HashMap::new();
    for metric in metrics {
        let mut values = metric_values(players, metric);
        values.sort_by(f64::total_cmp);

        let entry = if values.is_empty() {
            MetricStats {
                min: 0.0,
                max: 1.0,
                percentile_25: 0.25,
                percentile_75: 0.75,
                mean: 0.5,
            }
        } else {
            let n = values.len();
            let min = values[0];
            let max = values[n - 1];
            let mean = values.iter().sum::<f64>() / n as f64;
            let percentile_25 = values[percentile_index(n, 0.25)];
            let percentile_75 = values[percentile_index(n, 0.75)];
            let (min, max) = widen_if_degenerate(min, max);
            MetricStats {
                min,
                max,
                percentile_25,
                percentile_75,
                mean,
            }
        };
        stats.insert((*metric).to_string(), entry);
    }
    stats
}

fn metric_value(player: &Player, metric: &str) -> Option<f64> {
    player
        .metrics
        .get(metric)
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
}

fn metric_values(players: &[Player], metric: &str) -> Vec<f64> {
    players
        .iter()
        .filter_map(|p| metric_value(p, metric))
        .collect()
}

// Nearest-rank, not interpolated.
fn percentile_index(n: usize, k: f64) -> usize {
    (n as f64 * k).floor() as usize
}

fn widen_if_degenerate(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        ((min - 0.1).max(0.0), min + 0.1)
    } else {
        (min, max)
    }
}
