//! Pure normalization of raw header and event inputs.
//!
//! These functions turn the free-form string lists a client is constructed
//! with into the canonical lookup structures it routes and forwards with.
//! They run once, at construction time.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::NormalizeError;

fn control_chars() -> &'static Regex {
    static CONTROL: OnceLock<Regex> = OnceLock::new();
    CONTROL.get_or_init(|| Regex::new("[\\x00-\\x1f]+").expect("literal pattern parses"))
}

/// Normalizes `"Key: Value"` header entries into a last-write-wins map.
///
/// Each entry has ASCII control characters (0x00–0x1F) stripped, is split
/// on its first `:`, and has surrounding whitespace trimmed from both key
/// and value. Entries whose key is empty after trimming are discarded.
/// Key case is preserved.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingSeparator`] for an entry with no `:`.
pub fn normalize_headers<S: AsRef<str>>(
    raw: &[S],
) -> Result<HashMap<String, String>, NormalizeError> {
    let mut headers = HashMap::new();

    for entry in raw {
        let cleaned = control_chars().replace_all(entry.as_ref(), "");

        let Some((key, value)) = cleaned.split_once(':') else {
            return Err(NormalizeError::MissingSeparator {
                entry: entry.as_ref().to_string(),
            });
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        headers.insert(key.to_string(), value.trim().to_string());
    }

    Ok(headers)
}

/// Deduplicates raw event-type subscriptions into a set.
///
/// The wildcard `"*"` is stored as an ordinary entry; its meaning is
/// applied at routing time, not here.
pub fn normalize_events<S: AsRef<str>>(raw: &[S]) -> HashSet<String> {
    raw.iter().map(|event| event.as_ref().to_string()).collect()
}
