/// Rating assigned to a candidate the first time it is read.
/// Also used as a fixed anchor when normalizing scores, so an untouched
/// session normalizes every candidate to 0.
pub const BASELINE_RATING: i64 = 1000;

/// Maximum rating shift from a single judgment.
/// An even matchup moves each side by K/2 = 12 points.
pub const K_FACTOR: f64 = 24.0;

/// Logistic scale: a 400-point gap means the stronger side is expected
/// to win ten times as often as it loses.
pub const ELO_SCALE: f64 = 400.0;

/// Storage key for the persisted `{ratings, comparisons}` record.
pub const RATINGS_KEY: &str = "ranking-preferences-v1";

/// Storage key for the raw candidate list as originally supplied.
pub const CANDIDATES_KEY: &str = "activities";

/// Storage key for the last travel constraints used to fetch candidates.
pub const CONSTRAINTS_KEY: &str = "constraints";

/// Storage key for the last successfully generated itinerary.
pub const ITINERARY_KEY: &str = "itinerary";
