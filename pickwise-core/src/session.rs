/// The interactive ranking loop.
///
/// A session owns the candidate list, the rating store, the loaded state and
/// the pair currently on display. Each choice records a judgment and draws
/// the next pair with the winner passed as the display hint. A reset clears
/// everything and draws an unbiased pair.
use rand::Rng;
use tracing::info;

use crate::candidates::distinct_names;
use crate::engine::{record_judgment, EngineError};
use crate::pairing::pick_pair;
use crate::rating_store::RatingStore;
use crate::scoring::normalized_scores;
use crate::storage::{KeyValueStore, StoreError};
use crate::types::{Candidate, RatingState, ScoredCandidate};

/// Which side of the current pair the user preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Left,
    Right,
}

/// One round's answer from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Choose(Choice),
    Reset,
    Stop,
}

/// Presentation layer: shows a pair and returns the user's answer.
pub trait Judge {
    fn judge(&mut self, left: &Candidate, right: &Candidate, comparisons: u64) -> Signal;
}

impl<F> Judge for F
where
    F: FnMut(&Candidate, &Candidate, u64) -> Signal,
{
    fn judge(&mut self, left: &Candidate, right: &Candidate, comparisons: u64) -> Signal {
        self(left, right, comparisons)
    }
}

pub struct RankingSession<S, R> {
    candidates: Vec<Candidate>,
    store: RatingStore<S>,
    state: RatingState,
    /// Indices into `candidates`: (left, right).
    current: (usize, usize),
    rng: R,
}

impl<S: KeyValueStore, R: Rng> RankingSession<S, R> {
    /// Load persisted state and draw the first pair.
    ///
    /// Returns `None` when there are fewer than two distinct candidate names;
    /// in that case no session is started.
    pub fn start(candidates: Vec<Candidate>, store: RatingStore<S>, mut rng: R) -> Option<Self> {
        if distinct_names(&candidates) < 2 {
            return None;
        }
        let state = store.load();
        let current = pick_indices(&candidates, None, &mut rng)?;

        info!(
            candidates = candidates.len(),
            comparisons = state.comparisons,
            "Started ranking session"
        );

        Some(RankingSession { candidates, store, state, current, rng })
    }

    pub fn current_pair(&self) -> (&Candidate, &Candidate) {
        (&self.candidates[self.current.0], &self.candidates[self.current.1])
    }

    pub fn comparisons(&self) -> u64 {
        self.state.comparisons
    }

    pub fn state(&self) -> &RatingState {
        &self.state
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Record the user's choice on the current pair and move on to the next.
    ///
    /// The next pair is drawn even if saving failed, so the loop can go on
    /// with the in-memory state.
    pub fn choose(&mut self, choice: Choice) -> Result<(), EngineError> {
        let (left, right) = self.current;
        let (winner, loser) = match choice {
            Choice::Left => (left, right),
            Choice::Right => (right, left),
        };
        let winner_name = self.candidates[winner].name.clone();
        let loser_name = self.candidates[loser].name.clone();

        let recorded = record_judgment(&mut self.store, &mut self.state, &winner_name, &loser_name);
        self.redraw(Some(&winner_name));
        recorded
    }

    /// Forget all ratings and comparisons, then draw an unbiased pair.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let saved = self.store.reset(&mut self.state);
        info!("Reset ranking state");
        self.redraw(None);
        saved
    }

    /// Current normalized score for every candidate, in input order.
    pub fn normalized_scores(&self) -> Vec<ScoredCandidate> {
        normalized_scores(&self.state, &self.candidates)
    }

    /// Drive the loop until the judge answers [`Signal::Stop`].
    ///
    /// Storage failures end the loop with the error; the in-memory state
    /// stays valid and can still be read from the session.
    pub fn run<J: Judge>(&mut self, judge: &mut J) -> Result<(), EngineError> {
        loop {
            let (left, right) = self.current_pair();
            match judge.judge(left, right, self.state.comparisons) {
                Signal::Choose(choice) => self.choose(choice)?,
                Signal::Reset => self.reset()?,
                Signal::Stop => return Ok(()),
            }
        }
    }

    /// Hand back the storage, e.g. to read other records.
    pub fn into_store(self) -> RatingStore<S> {
        self.store
    }

    fn redraw(&mut self, preferred: Option<&str>) {
        // Candidate list is fixed for the session and had two distinct
        // names at start, so a pair is always available.
        if let Some(pair) = pick_indices(&self.candidates, preferred, &mut self.rng) {
            self.current = pair;
        }
    }
}

fn pick_indices<R: Rng + ?Sized>(
    candidates: &[Candidate],
    preferred: Option<&str>,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let (a, b) = pick_pair(candidates, preferred, rng)?;
    let index_of = |c: &Candidate| candidates.iter().position(|x| std::ptr::eq(x, c));
    Some((index_of(a)?, index_of(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, MemoryStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::path::PathBuf;

    /// Reads as empty, refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> storage::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> storage::Result<()> {
            Err(StoreError::Write {
                path: PathBuf::from(key),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, _key: &str) -> storage::Result<()> {
            Ok(())
        }
    }

    fn make_candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::new(*n, format!("{n} road"))).collect()
    }

    fn start(names: &[&str]) -> RankingSession<MemoryStore, StdRng> {
        RankingSession::start(
            make_candidates(names),
            RatingStore::new(MemoryStore::new()),
            StdRng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn test_not_started_below_two_distinct() {
        let store = RatingStore::new(MemoryStore::new());
        let rng = StdRng::seed_from_u64(0);
        assert!(RankingSession::start(make_candidates(&["A", "A"]), store, rng).is_none());

        let store = RatingStore::new(MemoryStore::new());
        let rng = StdRng::seed_from_u64(0);
        assert!(RankingSession::start(Vec::new(), store, rng).is_none());
    }

    #[test]
    fn test_choose_updates_winner_and_loser() {
        let mut session = start(&["A", "B", "C"]);
        let (left, right) = session.current_pair();
        let (left, right) = (left.name.clone(), right.name.clone());

        session.choose(Choice::Right).unwrap();
        assert_eq!(session.state().rating(&right), 1012);
        assert_eq!(session.state().rating(&left), 988);
        assert_eq!(session.comparisons(), 1);
    }

    #[test]
    fn test_winner_kept_out_of_left_slot() {
        let mut session = start(&["A", "B"]);
        for _ in 0..20 {
            let winner = session.current_pair().0.name.clone();
            session.choose(Choice::Left).unwrap();
            // Two candidates: the winner always reappears, on the right.
            assert_eq!(session.current_pair().1.name, winner);
        }
    }

    #[test]
    fn test_state_persisted_after_each_choice() {
        let mut session = start(&["A", "B", "C", "D"]);
        for _ in 0..5 {
            session.choose(Choice::Left).unwrap();
        }
        let state = session.state().clone();
        let store = session.into_store();
        assert_eq!(store.load(), state);
        assert_eq!(state.comparisons, 5);
    }

    #[test]
    fn test_resume_from_persisted_state() {
        let mut session = start(&["A", "B"]);
        session.choose(Choice::Left).unwrap();
        session.choose(Choice::Left).unwrap();
        let store = session.into_store();

        let resumed = RankingSession::start(make_candidates(&["A", "B"]), store, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(resumed.comparisons(), 2);
    }

    #[test]
    fn test_reset_clears_and_scores_zero() {
        let mut session = start(&["A", "B", "C"]);
        session.choose(Choice::Left).unwrap();
        session.choose(Choice::Right).unwrap();

        session.reset().unwrap();
        session.reset().unwrap();
        assert_eq!(session.state(), &RatingState::default());
        assert!(session.normalized_scores().iter().all(|s| s.score == 0.0));

        let (a, b) = session.current_pair();
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_run_with_closure_judge() {
        let mut session = start(&["A", "B", "C"]);
        let mut signals = vec![
            Signal::Choose(Choice::Left),
            Signal::Choose(Choice::Right),
            Signal::Reset,
            Signal::Choose(Choice::Left),
            Signal::Stop,
        ]
        .into_iter();
        let mut seen_counts = Vec::new();

        let mut judge = |left: &Candidate, right: &Candidate, comparisons: u64| {
            assert_ne!(left.name, right.name);
            seen_counts.push(comparisons);
            signals.next().unwrap_or(Signal::Stop)
        };
        session.run(&mut judge).unwrap();

        assert_eq!(seen_counts, vec![0, 1, 2, 0, 1]);
        assert_eq!(session.comparisons(), 1);
    }

    #[test]
    fn test_save_failure_keeps_session_usable() {
        let mut session = RankingSession::start(
            make_candidates(&["A", "B", "C"]),
            RatingStore::new(ReadOnlyStore),
            StdRng::seed_from_u64(8),
        )
        .unwrap();
        let winner = session.current_pair().0.name.clone();

        let err = session.choose(Choice::Left).unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::Write { .. })));
        assert_eq!(session.comparisons(), 1);
        assert_eq!(session.state().rating(&winner), 1012);
        let (a, b) = session.current_pair();
        assert_ne!(a.name, b.name);
        assert_ne!(a.name, winner);

        assert!(session.reset().is_err());
        assert_eq!(session.state(), &RatingState::default());
        let (a, b) = session.current_pair();
        assert_ne!(a.name, b.name);

        // The loop stops on the first failed save and hands back the error.
        let mut judge = |_: &Candidate, _: &Candidate, _: u64| Signal::Choose(Choice::Right);
        assert!(matches!(session.run(&mut judge), Err(EngineError::Store(_))));
        assert_eq!(session.comparisons(), 1);
    }

    #[test]
    fn test_scores_only_for_session_candidates() {
        let mut session = start(&["A", "B"]);
        session.choose(Choice::Left).unwrap();
        let scores = session.normalized_scores();
        assert_eq!(scores.len(), 2);
        let total: f64 = scores.iter().map(|s| s.score).sum();
        assert!((total - 1.0).abs() < 1e-12, "one at 1.0, one at 0.0");
    }
}
