use rand::Rng;
use rand::seq::SliceRandom;

/// Upper bound on shuffles tried before falling back to a rotation.
///
/// A uniform shuffle of nine items is a derangement roughly 37% of the time,
/// so exhausting this many attempts is practically unreachable.
pub const DERANGEMENT_ATTEMPTS: u32 = 64;

/// Returns a uniformly shuffled permutation of `0..N` with no fixed point.
///
/// Shuffles are rejected until one leaves every index away from its own
/// slot. Should the attempts run out, the identity rotated by one slot is
/// returned instead, which is always fixed-point free for `N > 1`.
pub fn derangement<const N: usize, R: Rng + ?Sized>(rng: &mut R) -> [u8; N] {
    let mut positions: [u8; N] = core::array::from_fn(|i| i as u8);

    for attempt in 1..=DERANGEMENT_ATTEMPTS {
        positions.shuffle(rng);
        if !has_fixed_point(&positions) {
            log::trace!("derangement found after {} attempt(s)", attempt);
            return positions;
        }
    }

    log::warn!(
        "No derangement after {} attempts, falling back to rotation",
        DERANGEMENT_ATTEMPTS
    );
    core::array::from_fn(|i| ((i + 1) % N) as u8)
}

pub fn has_fixed_point(positions: &[u8]) -> bool {
    positions
        .iter()
        .enumerate()
        .any(|(i, &position)| usize::from(position) == i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn derangement_is_a_fixed_point_free_permutation() {
        for seed in 0..500 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let positions: [u8; 9] = derangement(&mut rng);

            let mut sorted = positions;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6, 7, 8], "seed {}", seed);
            assert!(!has_fixed_point(&positions), "seed {}", seed);
        }
    }

    #[test]
    fn derangements_vary_between_seeds() {
        let mut rng_a = SmallRng::seed_from_u64(1);
        let mut rng_b = SmallRng::seed_from_u64(2);
        let a: [u8; 9] = derangement(&mut rng_a);
        let b: [u8; 9] = derangement(&mut rng_b);
        let c: [u8; 9] = derangement(&mut rng_a);

        assert!(a != b || a != c);
    }

    #[test]
    fn fixed_point_detection() {
        assert!(has_fixed_point(&[1, 0, 2]));
        assert!(!has_fixed_point(&[1, 2, 0]));
        assert!(!has_fixed_point(&[]));
    }
}
