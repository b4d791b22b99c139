use once_cell::sync::Lazy;
use regex::Regex;

// Some PFI exports are dumped straight from floating point pipelines and
// contain NaN/Infinity/undefined, which are not valid JSON tokens. Parsing
// aborts on the first one, so every fetched payload goes through this repair
// before serde_json sees it.
static NON_FINITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*(?:NaN|-Infinity|Infinity|undefined)").expect("valid regex"));

/// Garbage prefix observed in the roster export file.
const ROSTER_GARBAGE_PREFIX: &str = "perdo ";

pub fn clean_json_text(raw: &str) -> String {
    NON_FINITE.replace_all(raw, ": null").into_owned()
}

/// Strips the known leading garbage token from the roster payload, if present.
pub fn strip_known_prefix(raw: &str) -> &str {
    raw.strip_prefix(ROSTER_GARBAGE_PREFIX).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_non_finite_literals() {
        let raw = r#"{"a": NaN, "b": Infinity, "c": -Infinity, "d": undefined, "e": 1.5}"#;
        let cleaned = clean_json_text(raw);
        let v: serde_json::Value = serde_json::from_str(&cleaned).expect("repaired json parses");
        assert!(v["a"].is_null());
        assert!(v["b"].is_null());
        assert!(v["c"].is_null());
        assert!(v["d"].is_null());
        assert_eq!(v["e"], 1.5);
    }

    #[test]
    fn tolerates_whitespace_before_token() {
        let cleaned = clean_json_text("{\"v\":   NaN}");
        assert!(serde_json::from_str::<serde_json::Value>(&cleaned).is_ok());
    }

    #[test]
    fn leaves_valid_json_alone() {
        let raw = r#"{"name": "NaNcy", "v": 2}"#;
        assert_eq!(clean_json_text(raw), raw);
    }

    #[test]
    fn strips_roster_prefix_exactly_once() {
        assert_eq!(strip_known_prefix("perdo {\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_known_prefix("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_known_prefix("perdo perdo x"), "perdo x");
    }
}
