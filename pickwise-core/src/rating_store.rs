/// Loads and saves the ranking state under a single storage key.
///
/// Reads never fail: absent, unreadable, or malformed data all come back as
/// the empty state. Writes replace the whole record.
use tracing::{debug, warn};

use crate::constants::RATINGS_KEY;
use crate::storage::{KeyValueStore, Result};
use crate::types::RatingState;

pub struct RatingStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RatingStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, RATINGS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        RatingStore { store, key: key.into() }
    }

    /// Persisted state, or the empty state if there is none usable.
    pub fn load(&self) -> RatingState {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RatingState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read ranking state, starting empty");
                return RatingState::default();
            }
        };

        match serde_json::from_str::<RatingState>(&raw) {
            Ok(state) => state,
            Err(e) => {
                debug!(key = %self.key, error = %e, "Ignoring malformed ranking state");
                RatingState::default()
            }
        }
    }

    /// Overwrite the persisted state with `state`.
    pub fn save(&mut self, state: &RatingState) -> Result<()> {
        // Serializing a map of strings to integers cannot fail.
        let json = serde_json::to_string(state).unwrap_or_default();
        self.store.set(&self.key, &json)
    }

    /// Clear `state` in place and persist the cleared value.
    pub fn reset(&mut self, state: &mut RatingState) -> Result<()> {
        state.clear();
        self.save(state)
    }

    /// The underlying storage, for records kept under other keys.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample_state() -> RatingState {
        let mut state = RatingState::default();
        state.ratings.insert("Aquarium".into(), 1023);
        state.ratings.insert("Botanic Garden".into(), 977);
        state.ratings.insert("Night Market".into(), -40);
        state.comparisons = 7;
        state
    }

    #[test]
    fn test_load_without_persisted_state() {
        let store = RatingStore::new(MemoryStore::new());
        assert_eq!(store.load(), RatingState::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut store = RatingStore::new(MemoryStore::new());
        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load(), state);

        let empty = RatingState::default();
        store.save(&empty).unwrap();
        assert_eq!(store.load(), empty);
    }

    #[test]
    fn test_malformed_state_is_treated_as_absent() {
        for raw in ["not json", "null", "[1,2]", r#"{"ratings":{"A":"high"}}"#, r#"{"comparisons":-1}"#] {
            let mut backend = MemoryStore::new();
            backend.set(RATINGS_KEY, raw).unwrap();
            let store = RatingStore::new(backend);
            assert_eq!(store.load(), RatingState::default(), "input: {raw}");
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let mut backend = MemoryStore::new();
        backend.set(RATINGS_KEY, r#"{"ratings":{"A":1012}}"#).unwrap();
        let state = RatingStore::new(backend).load();
        assert_eq!(state.ratings.get("A"), Some(&1012));
        assert_eq!(state.comparisons, 0);
    }

    #[test]
    fn test_reset_clears_and_persists() {
        let mut store = RatingStore::new(MemoryStore::new());
        let mut state = sample_state();
        store.save(&state).unwrap();

        store.reset(&mut state).unwrap();
        assert_eq!(state, RatingState::default());
        assert_eq!(store.load(), RatingState::default());

        // Second reset is a no-op on an already-empty state.
        store.reset(&mut state).unwrap();
        assert_eq!(state, RatingState::default());
        assert_eq!(store.load(), RatingState::default());
    }

    #[test]
    fn test_file_backed_state_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let state = sample_state();
        {
            let backend = crate::storage::FileStore::open(tmp.path()).unwrap();
            let mut store = RatingStore::new(backend);
            store.save(&state).unwrap();
        }
        let backend = crate::storage::FileStore::open(tmp.path()).unwrap();
        assert_eq!(RatingStore::new(backend).load(), state);
    }
}
