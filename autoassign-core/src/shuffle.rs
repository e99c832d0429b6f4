//! Uniform shuffling and sampling without replacement
//!
//! Both operations work on a copy; the caller's slice is never reordered.

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

/// Return a uniformly shuffled copy of `items` using the thread-local RNG
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Return a uniformly shuffled copy of `items`
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    let len = out.len();
    shuffle_tail(&mut out, len, rng);
    out
}

/// Pick up to `count` distinct values from `items`, uniformly and without replacement
///
/// Repeated values in `items` are collapsed first, so every distinct value has
/// the same chance of being picked. Only the last `count` steps of the shuffle
/// are run. Returns fewer than `count` values only when there are not enough
/// distinct ones.
pub fn sample_distinct<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let mut pool = dedup(items);
    let take = count.min(pool.len());
    shuffle_tail(&mut pool, take, rng);
    pool.split_off(pool.len() - take)
}

/// Durstenfeld's Fisher-Yates, stopped after `count` steps
///
/// Walks from the last index down, swapping each element with one at a
/// uniformly chosen index at or below it. Afterwards the last `count`
/// elements are a uniform random sample, in random order.
fn shuffle_tail<T, R: Rng + ?Sized>(items: &mut [T], count: usize, rng: &mut R) {
    let len = items.len();
    let stop = len.saturating_sub(count).max(1);
    for i in (stop..len).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Drop repeated values, keeping the first occurrence of each
pub(crate) fn dedup<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut v = items.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let input = vec![1, 2, 2, 3, 4, 5, 6, 7, 8, 9];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shuffle_with(&input, &mut rng);
            assert_eq!(out.len(), input.len());
            assert_eq!(sorted(&out), sorted(&input));
        }
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let input = vec!["a", "b", "c", "d"];
        let before = input.clone();
        let _ = shuffle(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&["only"]), vec!["only"]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // With 3 elements there are 6 orderings; 600 draws should hit all of them.
        let input = [1, 2, 3];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..600 {
            seen.insert(shuffle_with(&input, &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_sample_distinct_exact_count() {
        let pool = vec!["a", "b", "c", "d", "e"];
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            for count in 0..=pool.len() {
                let picked = sample_distinct(&pool, count, &mut rng);
                assert_eq!(picked.len(), count);
                let unique: HashSet<_> = picked.iter().collect();
                assert_eq!(unique.len(), count);
                assert!(picked.iter().all(|p| pool.contains(p)));
            }
        }
    }

    #[test]
    fn test_sample_distinct_collapses_repeats() {
        let pool = vec!["a", "a", "a", "b"];
        let mut rng = StdRng::seed_from_u64(1);
        let picked = sample_distinct(&pool, 4, &mut rng);
        assert_eq!(sorted(&picked), vec!["a", "b"]);
    }

    #[test]
    fn test_sample_distinct_is_roughly_uniform() {
        let pool = ["a", "b", "c", "d"];
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = std::collections::HashMap::new();
        for _ in 0..4000 {
            for p in sample_distinct(&pool, 1, &mut rng) {
                *hits.entry(p).or_insert(0u32) += 1;
            }
        }
        for name in pool {
            let n = hits[name];
            assert!((800..1200).contains(&n), "{name} picked {n} times");
        }
    }

    #[test]
    fn test_sample_distinct_whole_pool_is_permutation() {
        let pool = vec![3, 1, 2];
        let mut rng = StdRng::seed_from_u64(5);
        let picked = sample_distinct(&pool, 3, &mut rng);
        assert_eq!(sorted(&picked), vec![1, 2, 3]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup(&["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    }
}
