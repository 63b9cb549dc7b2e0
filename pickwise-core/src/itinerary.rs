/// Wire types for the itinerary-generation service.
///
/// The core only builds the request payload from normalized scores; sending
/// it is up to the caller.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::ITINERARY_KEY;
use crate::storage::{KeyValueStore, Result};
use crate::types::{Candidate, ScoredCandidate};

/// Travel constraints entered before candidates were generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub destination: String,
    pub date_of_travel: String,
    pub address: String,
    #[serde(default)]
    pub freeform_text: String,
}

/// A candidate as the itinerary service expects it: every field present,
/// empty when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub category: String,
}

impl From<&Candidate> for Event {
    fn from(c: &Candidate) -> Self {
        Event {
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
            address: c.address.clone(),
            website: c.website.clone().unwrap_or_default(),
            image: c.image.clone().unwrap_or_default(),
            cost: c.cost.clone().unwrap_or_default(),
            category: c.category.clone().unwrap_or_default(),
        }
    }
}

impl From<Event> for Candidate {
    fn from(e: Event) -> Self {
        fn non_empty(s: String) -> Option<String> {
            if s.is_empty() { None } else { Some(s) }
        }
        Candidate {
            name: e.name,
            address: e.address,
            description: non_empty(e.description),
            website: non_empty(e.website),
            image: non_empty(e.image),
            cost: non_empty(e.cost),
            category: non_empty(e.category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub event: Event,
    pub score: f64,
}

/// Request body: the constraints' fields sit next to `events`.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryRequest<'a> {
    #[serde(flatten)]
    pub constraints: &'a Constraints,
    pub events: &'a [ScoredEvent],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEvent {
    pub event: Event,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub pictures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub events: Vec<ItineraryEvent>,
}

/// Build the per-candidate weights handed to the itinerary service.
pub fn scored_events(scores: &[ScoredCandidate]) -> Vec<ScoredEvent> {
    scores
        .iter()
        .map(|s| ScoredEvent {
            event: Event::from(&s.candidate),
            score: s.score,
        })
        .collect()
}

/// Last saved itinerary, `None` if absent or unusable.
pub fn load_itinerary<S: KeyValueStore>(store: &S) -> Option<Itinerary> {
    let raw = match store.get(ITINERARY_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            debug!(error = %e, "Could not read saved itinerary");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(itinerary) => Some(itinerary),
        Err(e) => {
            debug!(error = %e, "Ignoring malformed saved itinerary");
            None
        }
    }
}

pub fn save_itinerary<S: KeyValueStore>(store: &mut S, itinerary: &Itinerary) -> Result<()> {
    let json = serde_json::to_string(itinerary).unwrap_or_else(|_| "{}".to_string());
    store.set(ITINERARY_KEY, &json)
}
