// Centroid seeding
//
// The random source is always injected. Production code gets an
// entropy-seeded StdRng; tests and `--seed` runs get a reproducible one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the generator used for centroid sampling
///
/// `Some(seed)` is reproducible across runs and platforms; `None` seeds
/// from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw `k` point indices uniformly, with replacement
///
/// The same index may appear more than once; duplicate centroids are how
/// empty clusters arise.
pub fn sample_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    (0..k).map(|_| rng.gen_range(0..n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_indices() {
        let a = sample_indices(100, 5, &mut seeded_rng(Some(7)));
        let b = sample_indices(100, 5, &mut seeded_rng(Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_indices_in_range() {
        let mut rng = seeded_rng(Some(1));
        for _ in 0..50 {
            let idx = sample_indices(4, 3, &mut rng);
            assert_eq!(idx.len(), 3);
            assert!(idx.iter().all(|&i| i < 4));
        }
    }

    #[test]
    fn test_single_point_always_index_zero() {
        assert_eq!(sample_indices(1, 3, &mut seeded_rng(None)), vec![0, 0, 0]);
    }

    #[test]
    fn test_no_points_no_indices() {
        assert!(sample_indices(0, 3, &mut seeded_rng(Some(0))).is_empty());
    }
}
