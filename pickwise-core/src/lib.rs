/// pickwise-core: Pairwise preference ranking.
///
/// Repeated "which of these two?" choices → Elo-style ratings → normalized
/// per-candidate weights in [0, 1]. No network IO; persistence goes through
/// the [`KeyValueStore`] trait so callers pick where state lives.
///
/// Candidates are identified by name. Ratings start at 1000 and move by at
/// most 24 points per judgment.
///
/// # Quick start
///
/// ```rust
/// use pickwise_core::{Candidate, Choice, MemoryStore, RankingSession, RatingStore};
///
/// let candidates = vec![
///     Candidate::new("Aquarium", "1 Harbor Way"),
///     Candidate::new("Botanic Garden", "9 Park Rd"),
///     Candidate::new("Night Market", "Main St"),
/// ];
///
/// let store = RatingStore::new(MemoryStore::new());
/// let mut session = RankingSession::start(candidates, store, rand::rng())
///     .expect("at least two distinct candidates");
///
/// let (left, right) = session.current_pair();
/// println!("{} or {}?", left.name, right.name);
/// session.choose(Choice::Left).unwrap();
///
/// for s in session.normalized_scores() {
///     println!("{}: {:.3}", s.candidate.name, s.score);
/// }
/// ```

pub mod candidates;
pub mod constants;
pub mod elo;
pub mod engine;
pub mod itinerary;
pub mod pairing;
pub mod rating_store;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod types;

// Re-export primary public API at crate root.
pub use candidates::{clear_candidates, distinct_names, load_candidates, parse_candidates, save_candidates};
pub use engine::{record_judgment, EngineError};
pub use itinerary::{
    load_itinerary, save_itinerary, scored_events, Constraints, Event, Itinerary, ItineraryEvent, ItineraryRequest,
    ScoredEvent,
};
pub use pairing::pick_pair;
pub use rating_store::RatingStore;
pub use scoring::{normalized_scores, ranked_scores};
pub use session::{Choice, Judge, RankingSession, Signal};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{Candidate, RatingState, ScoredCandidate};
