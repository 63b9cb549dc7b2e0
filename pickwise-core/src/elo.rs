/// Paired-comparison rating update.
///
/// Each judgment is an O(1) update of the two participants only; nothing
/// about the rest of the candidate set is recomputed.
use crate::constants::{ELO_SCALE, K_FACTOR};

/// Probability that a side rated `rating` beats a side rated `opponent`.
pub fn expected_score(rating: i64, opponent: i64) -> f64 {
    let gap = opponent as i128 - rating as i128;
    1.0 / (1.0 + 10f64.powf(gap as f64 / ELO_SCALE))
}

/// New `(winner, loser)` ratings after the winner is preferred once.
pub fn update(winner: i64, loser: i64) -> (i64, i64) {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = 1.0 - expected_winner;

    // Shifts are at most K in size; apply them in integer space so large
    // ratings keep full precision and saturate instead of overflowing.
    let winner_shift = round_half_up(K_FACTOR * (1.0 - expected_winner));
    let loser_shift = round_half_up(K_FACTOR * (0.0 - expected_loser));
    (winner.saturating_add(winner_shift), loser.saturating_add(loser_shift))
}

/// Round to the nearest integer, with halves going toward +inf
/// (so -12.5 becomes -12, not -13).
/// Values beyond the `i64` range saturate.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_expected_score_even_matchup() {
        assert!((expected_score(1000, 1000) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_400_gap() {
        // 10:1 odds
        let p = expected_score(1400, 1000);
        assert!((p - 10.0 / 11.0).abs() < 1e-12);
        assert!((expected_score(1000, 1400) - 1.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_even_matchup() {
        assert_eq!(update(1000, 1000), (1012, 988));
    }

    #[test]
    fn test_update_favourite_gains_less() {
        let (w, l) = update(1200, 1000);
        assert!(w - 1200 < 12);
        assert!(1000 - l < 12);
    }

    #[test]
    fn test_update_underdog_gains_more() {
        let (w, l) = update(1000, 1200);
        assert!(w - 1000 > 12);
        assert!(1200 - l > 12);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(-12.5), -12);
        assert_eq!(round_half_up(-12.6), -13);
        assert_eq!(round_half_up(987.49), 987);
    }

    #[test]
    fn test_update_at_rating_extremes() {
        assert_eq!(update(i64::MAX, i64::MIN), (i64::MAX, i64::MIN));
        let (w, l) = update(i64::MIN, i64::MAX);
        assert_eq!(w, i64::MIN + 24);
        assert_eq!(l, i64::MAX - 24);
    }

    #[test]
    fn test_expected_score_extreme_gap() {
        assert_eq!(expected_score(i64::MAX, i64::MIN), 1.0);
        assert_eq!(expected_score(i64::MIN, i64::MAX), 0.0);
    }

    proptest! {
        #[test]
        fn winner_never_drops_and_loser_never_rises(
            winner in any::<i64>(),
            loser in any::<i64>(),
        ) {
            let (w, l) = update(winner, loser);
            prop_assert!(w >= winner);
            prop_assert!(l <= loser);
            prop_assert!(w - winner <= K_FACTOR as i64);
            prop_assert!(loser - l <= K_FACTOR as i64);
        }
    }
}
