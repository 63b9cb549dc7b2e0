/// Judgment recording: the rating update plus persistence.
///
/// The caller presents a pair, collects one binary outcome, and feeds it back
/// here. Every recorded judgment is written through to storage immediately.
use thiserror::Error;
use tracing::debug;

use crate::elo;
use crate::rating_store::RatingStore;
use crate::storage::{KeyValueStore, StoreError};
use crate::types::RatingState;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a candidate cannot be judged against itself: {0:?}")]
    SelfComparison(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Record that `winner` was preferred over `loser`.
///
/// Both ratings are initialized to the baseline on first use, updated,
/// the comparison count is bumped by one, and the full state is saved.
/// If the save fails the in-memory state is already updated.
pub fn record_judgment<S: KeyValueStore>(
    store: &mut RatingStore<S>,
    state: &mut RatingState,
    winner: &str,
    loser: &str,
) -> Result<(), EngineError> {
    if winner == loser {
        return Err(EngineError::SelfComparison(winner.to_string()));
    }

    let winner_rating = state.get_or_init(winner);
    let loser_rating = state.get_or_init(loser);
    let (winner_new, loser_new) = elo::update(winner_rating, loser_rating);

    state.ratings.insert(winner.to_string(), winner_new);
    state.ratings.insert(loser.to_string(), loser_new);
    state.comparisons += 1;

    debug!(
        winner,
        loser,
        winner_rating = winner_new,
        loser_rating = loser_new,
        comparisons = state.comparisons,
        "Recorded judgment"
    );

    store.save(state)?;
    Ok(())
}
