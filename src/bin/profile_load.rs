use anyhow::{anyhow, Result};

use pfi_scout::dataset::DatasetStore;
use pfi_scout::profiles::Profile;
use pfi_scout::stats::weighted_mean;

const DEFAULT_TOP: usize = 15;

fn main() -> Result<()> {
    sensible_env_logger::init!();

    let profile = parse_profile_arg()?;
    let base_url = parse_base_url_arg()
        .or_else(DatasetStore::base_url_from_env)
        .ok_or_else(|| anyhow!("no base url: pass --base-url or set PFI_DATA_BASE_URL"))?;

    let mut store = DatasetStore::with_http(base_url);
    let outcome = store.load(profile);
    if let Some(err) = outcome.error {
        return Err(anyhow!("{err}"));
    }

    println!("Profile: {profile}");
    println!(
        "Rows kept: {}/{}",
        outcome.stats.records_accepted, outcome.stats.records_seen
    );

    let mut ranked = outcome.players;
    ranked.sort_by(|a, b| b.fit_index.total_cmp(&a.fit_index));

    println!("\nTop {} by fit index:", DEFAULT_TOP.min(ranked.len()));
    for player in ranked.iter().take(DEFAULT_TOP) {
        println!(
            "  {:5.1}  {:<28} {:>3}  {:<24} {}",
            player.fit_index, player.name, player.age, player.club, player.competition
        );
    }

    println!("\nCohort weighted means:");
    for metric in *profile.metrics() {
        println!("  {:<46} {:.3}", metric, weighted_mean(&ranked, metric));
    }

    Ok(())
}

fn parse_profile_arg() -> Result<Profile> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for arg in &args {
        if let Some(value) = arg.strip_prefix("--profile=") {
            return value.parse();
        }
    }
    if let Some(first) = args.iter().find(|a| !a.starts_with("--")) {
        return first.parse();
    }
    Err(anyhow!(
        "usage: profile_load <profile> [--base-url=URL]  (profiles: {})",
        Profile::ALL
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn parse_base_url_arg() -> Option<String> {
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--base-url=") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
