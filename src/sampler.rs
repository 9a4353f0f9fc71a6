/// Small deterministic RNG (splitmix64) used for reproducible sampling.
#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Sample size for a table of `row_count` rows under the
/// `max(min_rows, row_count / divisor)` policy, clamped to the row count.
///
/// The clamp covers sources smaller than `min_rows`: the whole file is
/// sampled instead of the draw failing.
pub fn sample_size(row_count: usize, min_rows: usize, divisor: usize) -> usize {
    let requested = min_rows.max(row_count / divisor.max(1));
    requested.min(row_count)
}

/// Draw `amount` distinct row indices from `0..row_count` uniformly at
/// random.
///
/// The draw is fully determined by `seed`; a fresh RNG state is built per
/// call so repeated draws with the same inputs return the same indices.
pub fn draw_sample_indices(row_count: usize, amount: usize, seed: u64) -> Vec<usize> {
    let amount = amount.min(row_count);
    if amount == 0 {
        return Vec::new();
    }
    let mut rng = DeterministicRng::new(seed);
    rand::seq::index::sample(&mut rng, row_count, amount).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_size_follows_the_policy() {
        // Below the floor the whole file is taken.
        assert_eq!(sample_size(0, 1000, 10), 0);
        assert_eq!(sample_size(500, 1000, 10), 500);
        assert_eq!(sample_size(999, 1000, 10), 999);
        // At and above the floor the max(floor, tenth) rule applies.
        assert_eq!(sample_size(1000, 1000, 10), 1000);
        assert_eq!(sample_size(9_999, 1000, 10), 1000);
        assert_eq!(sample_size(10_000, 1000, 10), 1000);
        assert_eq!(sample_size(25_000, 1000, 10), 2500);
        // Integer division floors the proportional part.
        assert_eq!(sample_size(10_009, 1000, 10), 1000);
        assert_eq!(sample_size(20_019, 1000, 10), 2001);
    }

    #[test]
    fn sample_size_never_exceeds_row_count() {
        for rows in [0usize, 1, 9, 999, 1000, 1001, 50_000] {
            assert!(sample_size(rows, 1000, 10) <= rows);
        }
    }

    #[test]
    fn draws_are_deterministic_per_seed() {
        let first = draw_sample_indices(12_000, 1200, 42);
        let second = draw_sample_indices(12_000, 1200, 42);
        assert_eq!(first, second);

        let other_seed = draw_sample_indices(12_000, 1200, 43);
        assert_ne!(first, other_seed);
    }

    #[test]
    fn draws_are_distinct_and_in_range() {
        let indices = draw_sample_indices(5_000, 500, 42);
        assert_eq!(indices.len(), 500);
        let unique: HashSet<usize> = indices.iter().copied().collect();
        assert_eq!(unique.len(), 500);
        assert!(indices.iter().all(|&idx| idx < 5_000));
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let indices = draw_sample_indices(120, 120, 42);
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..120).collect::<Vec<_>>());
    }

    #[test]
    fn oversized_and_zero_requests_are_clamped() {
        assert_eq!(draw_sample_indices(10, 25, 42).len(), 10);
        assert!(draw_sample_indices(10, 0, 42).is_empty());
        assert!(draw_sample_indices(0, 1000, 42).is_empty());
    }
}
