use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::BASELINE_RATING;
use crate::elo::round_half_up;

/// An item the user can express a preference for.
///
/// Identity is by `name`; everything else is payload carried through
/// unchanged to presentation and to the itinerary request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Candidate {
    /// A candidate with only the required fields set.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Candidate {
            name: name.into(),
            address: address.into(),
            description: None,
            website: None,
            image: None,
            cost: None,
            category: None,
        }
    }
}

/// Optional payload text: strings as-is, numbers and booleans rendered as
/// text, anything else treated as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Ratings may be stored as reals; they are rounded on load.
fn whole_ratings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, i64>, D::Error> {
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(name, r)| (name, round_half_up(r))).collect())
}

/// Persisted ranking state: one rating per candidate name that has taken
/// part in a judgment, plus the number of judgments ever recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingState {
    #[serde(default, deserialize_with = "whole_ratings")]
    pub ratings: BTreeMap<String, i64>,
    #[serde(default)]
    pub comparisons: u64,
}

impl RatingState {
    /// Rating for `name`, writing the baseline into the map first if absent.
    pub fn get_or_init(&mut self, name: &str) -> i64 {
        *self.ratings.entry(name.to_string()).or_insert(BASELINE_RATING)
    }

    /// Rating for `name` without touching the map.
    pub fn rating(&self, name: &str) -> i64 {
        self.ratings.get(name).copied().unwrap_or(BASELINE_RATING)
    }

    /// Forget every rating and the comparison count.
    pub fn clear(&mut self) {
        self.ratings.clear();
        self.comparisons = 0;
    }
}

/// A candidate with its normalized preference score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}
