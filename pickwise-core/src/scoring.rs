/// Normalization of raw ratings into per-candidate weights in [0, 1].
use crate::constants::BASELINE_RATING;
use crate::types::{Candidate, RatingState, ScoredCandidate};

/// Score every candidate as `(rating - min) / range`.
///
/// `min` and `max` are taken over the candidates' ratings together with the
/// baseline, so with no judgments recorded every score is 0. Candidates that
/// were never judged read as the baseline; `state` is not modified.
pub fn normalized_scores(state: &RatingState, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
    let ratings: Vec<i64> = candidates.iter().map(|c| state.rating(&c.name)).collect();

    let min = ratings.iter().copied().fold(BASELINE_RATING, i64::min);
    let max = ratings.iter().copied().fold(BASELINE_RATING, i64::max);
    // Widened so the full i64 rating range cannot overflow.
    let range = match max as i128 - min as i128 {
        0 => 1,
        r => r,
    };

    candidates
        .iter()
        .zip(ratings)
        .map(|(candidate, rating)| ScoredCandidate {
            candidate: candidate.clone(),
            score: (rating as i128 - min as i128) as f64 / range as f64,
        })
        .collect()
}

/// Same scores, sorted best first. Ties keep input order.
pub fn ranked_scores(state: &RatingState, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
    let mut scores = normalized_scores(state, candidates);
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scores
}
