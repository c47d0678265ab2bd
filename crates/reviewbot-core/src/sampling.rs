use crate::error::{Result, ReviewError};
use rand::Rng;
use std::collections::BTreeSet;

/// Default multiplier bounding the number of draws made by [`select_random`].
pub const DEFAULT_ATTEMPT_FACTOR: u32 = 5;

/// Pick `n` distinct entries from `pool`, uniformly at random.
///
/// Returns the whole pool (without touching `rng`) when `n` covers it, and an
/// empty vector when `n` is zero. Otherwise indices are drawn from `rng` and
/// rejected if already taken, up to `n * attempt_factor` draws in total.
/// Running out of draws is reported as [`ReviewError::InvariantViolation`].
///
/// Picks are returned in the order they were drawn.
pub fn select_random<T, R>(n: usize, pool: &[T], rng: &mut R, attempt_factor: u32) -> Result<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Ok(Vec::new());
    }
    if n >= pool.len() {
        return Ok(pool.to_vec());
    }

    let max_attempts = n.saturating_mul(attempt_factor as usize);
    let mut taken = BTreeSet::new();
    let mut picks = Vec::with_capacity(n);
    let mut attempts = 0;

    while picks.len() < n {
        if attempts >= max_attempts {
            return Err(ReviewError::InvariantViolation {
                requested: n,
                pool: pool.len(),
                attempts,
            });
        }
        attempts += 1;
        let i = rng.gen_range(0..pool.len());
        if taken.insert(i) {
            picks.push(pool[i].clone());
        }
    }

    Ok(picks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn zero_requested_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_random(0, &pool(&["a", "b"]), &mut rng, DEFAULT_ATTEMPT_FACTOR).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn covering_request_returns_whole_pool_without_drawing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut untouched = StdRng::seed_from_u64(7);
        let all = pool(&["a", "b", "c"]);
        let picked = select_random(5, &all, &mut rng, DEFAULT_ATTEMPT_FACTOR).unwrap();
        assert_eq!(picked, all);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_random::<String, _>(2, &[], &mut rng, DEFAULT_ATTEMPT_FACTOR).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn same_seed_same_pick() {
        let candidates = pool(&["a", "b", "c"]);
        let first = select_random(1, &candidates, &mut StdRng::seed_from_u64(42), 5).unwrap();
        for _ in 0..10 {
            let again = select_random(1, &candidates, &mut StdRng::seed_from_u64(42), 5).unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(first.len(), 1);
        assert!(candidates.contains(&first[0]));
    }

    #[test]
    fn stuck_source_reports_invariant_violation() {
        // A source that always yields the same index can never find a
        // second distinct entry.
        let mut rng = StepRng::new(0, 0);
        let err = select_random(2, &pool(&["a", "b", "c"]), &mut rng, 5).unwrap_err();
        match err {
            ReviewError::InvariantViolation {
                requested,
                pool,
                attempts,
            } => {
                assert_eq!(requested, 2);
                assert_eq!(pool, 3);
                assert_eq!(attempts, 10);
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn picks_are_distinct_and_sized(
            size in 0usize..40,
            n in 0usize..50,
            seed in any::<u64>(),
        ) {
            let candidates: Vec<usize> = (0..size).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            // A generous factor keeps the cap out of the way; the cap itself
            // is covered above.
            let picked = select_random(n, &candidates, &mut rng, 1000).unwrap();
            prop_assert_eq!(picked.len(), n.min(size));
            let unique: BTreeSet<_> = picked.iter().collect();
            prop_assert_eq!(unique.len(), picked.len());
            if n >= size {
                prop_assert_eq!(picked, candidates);
            }
        }
    }
}
