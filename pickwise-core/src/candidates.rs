/// Candidate list persistence and validation.
use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::constants::CANDIDATES_KEY;
use crate::storage::{KeyValueStore, Result};
use crate::types::Candidate;

/// Parse a JSON array of candidates.
///
/// Entries without a string `name` and a string `address` are dropped.
/// Anything that is not a JSON array yields an empty list.
pub fn parse_candidates(raw: &str) -> Vec<Candidate> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            debug!("Candidate list is not a JSON array, ignoring");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "Ignoring malformed candidate list");
            return Vec::new();
        }
    };

    let total = entries.len();
    let candidates: Vec<Candidate> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if candidates.len() < total {
        debug!(dropped = total - candidates.len(), "Dropped candidate entries missing name or address");
    }
    candidates
}

/// Number of distinct names. A ranking session needs at least 2.
pub fn distinct_names(candidates: &[Candidate]) -> usize {
    candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Stored candidate list, empty if absent or unusable.
pub fn load_candidates<S: KeyValueStore>(store: &S) -> Vec<Candidate> {
    match store.get(CANDIDATES_KEY) {
        Ok(Some(raw)) => parse_candidates(&raw),
        Ok(None) => Vec::new(),
        Err(e) => {
            debug!(error = %e, "Could not read candidate list");
            Vec::new()
        }
    }
}

pub fn save_candidates<S: KeyValueStore>(store: &mut S, candidates: &[Candidate]) -> Result<()> {
    let json = serde_json::to_string(candidates).unwrap_or_else(|_| "[]".to_string());
    store.set(CANDIDATES_KEY, &json)
}

pub fn clear_candidates<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(CANDIDATES_KEY)
}
