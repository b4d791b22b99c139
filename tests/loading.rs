use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{anyhow, Result};

use pfi_scout::dataset::{parse_profile_players, DatasetStore, Fetcher};
use pfi_scout::profiles::Profile;

const GOOD_BODY: &str = r#"[
    {"Jugador": "Alpha", "PFI_M": 0.9, "norm_xA/90": 0.8},
    {"Jugador": "Beta", "PFI_M": 71.0},
    {"Jugador": "Rechazado"}
]"#;

/// Replays scripted responses in order and counts every call.
struct ScriptedFetcher {
    responses: RefCell<VecDeque<Result<String>>>,
    calls: Rc<Cell<usize>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<String>>) -> (Box<Self>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let fetcher = Box::new(Self {
            responses: RefCell::new(responses.into()),
            calls: Rc::clone(&calls),
        });
        (fetcher, calls)
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch_text(&self, _url: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
    }
}

fn store_with(responses: Vec<Result<String>>) -> (DatasetStore, Rc<Cell<usize>>) {
    let (fetcher, calls) = ScriptedFetcher::new(responses);
    (DatasetStore::new(fetcher, "https://example.test/data"), calls)
}

#[test]
fn second_load_hits_cache_without_fetching() {
    let (mut store, calls) = store_with(vec![Ok(GOOD_BODY.to_string())]);

    let first = store.load(Profile::AttackingMid);
    assert!(first.error.is_none());
    assert!(!first.from_cache);
    assert_eq!(first.players.len(), 2);
    assert_eq!(first.stats.records_seen, 3);
    assert_eq!(first.stats.records_accepted, 2);

    let second = store.load(Profile::AttackingMid);
    assert!(second.from_cache);
    assert_eq!(second.players.len(), 2);
    assert_eq!(calls.get(), 1);
}

#[test]
fn transport_failure_surfaces_error_and_is_not_cached() {
    let (mut store, calls) = store_with(vec![
        Err(anyhow!("http 503: unavailable")),
        Ok(GOOD_BODY.to_string()),
    ]);

    let failed = store.load(Profile::AttackingMid);
    assert!(failed.players.is_empty());
    assert!(failed.error.as_deref().is_some_and(|e| e.contains("503")));
    assert!(store.cached(Profile::AttackingMid).is_none());

    // Re-selecting the profile retries instead of serving the failure.
    let retried = store.load(Profile::AttackingMid);
    assert!(retried.error.is_none());
    assert_eq!(retried.players.len(), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn all_rows_rejected_is_a_dataset_error() {
    let body = r#"[{"Jugador": "NoFit"}, {"PFI_M": 50.0}]"#;
    let (mut store, _calls) = store_with(vec![Ok(body.to_string())]);

    let outcome = store.load(Profile::AttackingMid);
    assert!(outcome.players.is_empty());
    assert!(outcome.error.is_some());
    assert!(store.cached(Profile::AttackingMid).is_none());
}

#[test]
fn malformed_json_is_a_dataset_error() {
    let (mut store, _calls) = store_with(vec![Ok("perdo not json at all".to_string())]);
    let outcome = store.load(Profile::Forward);
    assert!(outcome.error.is_some());
}

#[test]
fn stale_response_does_not_overwrite_newer_load() {
    let (fetcher, _calls) = ScriptedFetcher::new(vec![]);
    let mut store = DatasetStore::new(fetcher, "https://example.test/data");

    let slow = store.begin_load(Profile::Forward);
    let fast = store.begin_load(Profile::Forward);

    let fast_players = parse_profile_players(
        r#"[{"Jugador": "Fresh", "PFI_A": 80.0}]"#,
        Profile::Forward,
    )
    .expect("parses")
    .0;
    let slow_players = parse_profile_players(
        r#"[{"Jugador": "Stale", "PFI_A": 70.0}]"#,
        Profile::Forward,
    )
    .expect("parses")
    .0;

    assert!(store.finish_load(fast, fast_players));
    // The superseded request completes late and must be discarded.
    assert!(!store.finish_load(slow, slow_players));

    let cached = store.cached(Profile::Forward).expect("cache committed");
    assert_eq!(cached[0].name, "Fresh");
}

#[test]
fn loads_for_different_profiles_do_not_interfere() {
    let (fetcher, _calls) = ScriptedFetcher::new(vec![]);
    let mut store = DatasetStore::new(fetcher, "https://example.test/data");

    let forward = store.begin_load(Profile::Forward);
    let keeper = store.begin_load(Profile::Goalkeeper);

    let forwards =
        parse_profile_players(r#"[{"Jugador": "F", "PFI_A": 1.5}]"#, Profile::Forward)
            .expect("parses")
            .0;
    let keepers = parse_profile_players(
        r#"[{"Jugador": "G", "PFI_GK": 0.5}]"#,
        Profile::Goalkeeper,
    )
    .expect("parses")
    .0;

    assert!(store.finish_load(forward, forwards));
    assert!(store.finish_load(keeper, keepers));
    assert!(store.cached(Profile::Forward).is_some());
    assert!(store.cached(Profile::Goalkeeper).is_some());
}

#[test]
fn invalidate_evicts_one_profile_and_forces_refetch() {
    let (mut store, calls) = store_with(vec![
        Ok(GOOD_BODY.to_string()),
        Ok(GOOD_BODY.to_string()),
    ]);

    store.load(Profile::AttackingMid);
    store.invalidate(Profile::AttackingMid);
    assert!(store.cached(Profile::AttackingMid).is_none());

    let reloaded = store.load(Profile::AttackingMid);
    assert!(!reloaded.from_cache);
    assert_eq!(calls.get(), 2);
}
