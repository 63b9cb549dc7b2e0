/// Pair selection for the next judgment.
///
/// Both slots are drawn from a fresh uniform shuffle of the whole candidate
/// list every time. The `preferred` name is only a display hint: if it lands
/// in the first slot it is moved to the second. It is never forced into the
/// pair.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Candidate;

/// Pick two candidates with different names.
///
/// Returns `None` when `candidates` has fewer than two entries. If every
/// entry shares one name the two returned candidates share it too; callers
/// are expected to check [`crate::candidates::distinct_names`] first.
pub fn pick_pair<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    preferred: Option<&str>,
    rng: &mut R,
) -> Option<(&'a Candidate, &'a Candidate)> {
    if candidates.len() < 2 {
        return None;
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.shuffle(rng);

    let mut first = &candidates[order[0]];
    let mut second = order[1..]
        .iter()
        .map(|&i| &candidates[i])
        .find(|c| c.name != first.name)
        .unwrap_or(&candidates[order[1]]);

    if preferred == Some(first.name.as_str()) {
        std::mem::swap(&mut first, &mut second);
    }

    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::new(*n, format!("{n} street"))).collect()
    }

    #[test]
    fn test_pair_is_distinct_and_from_input() {
        let candidates = make_candidates(&["A", "B", "C", "D", "E"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let (a, b) = pick_pair(&candidates, None, &mut rng).unwrap();
            assert_ne!(a.name, b.name);
            assert!(candidates.contains(a));
            assert!(candidates.contains(b));
        }
    }

    #[test]
    fn test_duplicate_names_still_distinct() {
        let candidates = make_candidates(&["A", "A", "A", "A", "B"]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let (a, b) = pick_pair(&candidates, None, &mut rng).unwrap();
            assert_ne!(a.name, b.name);
        }
    }

    #[test]
    fn test_preferred_never_in_first_slot_when_drawn_first() {
        let candidates = make_candidates(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(3);

        // With two candidates the preferred one is always drawn, and the
        // swap always leaves it on the right.
        for _ in 0..100 {
            let (a, b) = pick_pair(&candidates, Some("A"), &mut rng).unwrap();
            assert_eq!(a.name, "B");
            assert_eq!(b.name, "A");
        }
    }

    #[test]
    fn test_preferred_is_only_a_hint() {
        let candidates = make_candidates(&["A", "B", "C", "D", "E", "F"]);
        let mut rng = StdRng::seed_from_u64(5);

        let mut absent = 0;
        for _ in 0..500 {
            let (a, b) = pick_pair(&candidates, Some("A"), &mut rng).unwrap();
            assert_ne!(a.name, "A");
            if b.name != "A" {
                absent += 1;
            }
        }
        assert!(absent > 0, "preferred candidate should sometimes be left out");
    }

    #[test]
    fn test_every_candidate_gets_drawn() {
        let candidates = make_candidates(&["A", "B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let (a, b) = pick_pair(&candidates, None, &mut rng).unwrap();
            seen.insert(a.name.clone());
            seen.insert(b.name.clone());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_too_few_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_pair(&make_candidates(&["A"]), None, &mut rng).is_none());
        assert!(pick_pair(&[], None, &mut rng).is_none());
    }
}
