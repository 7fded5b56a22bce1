use rand::Rng;

/// Picks a cell in `0..cells` uniformly, never repeating `previous`.
pub fn next_target_cell<R: Rng + ?Sized>(previous: Option<u8>, cells: u8, rng: &mut R) -> u8 {
    match previous {
        Some(previous) if cells > 1 && previous < cells => {
            let cell = rng.random_range(0..cells - 1);
            if cell >= previous { cell + 1 } else { cell }
        }
        _ => rng.random_range(0..cells.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn never_repeats_previous_cell() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut previous = None;
        let mut seen = [false; 16];

        for _ in 0..2000 {
            let cell = next_target_cell(previous, 16, &mut rng);
            assert!(cell < 16);
            assert_ne!(Some(cell), previous);
            seen[usize::from(cell)] = true;
            previous = Some(cell);
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn single_cell_grid_has_no_alternative() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(next_target_cell(Some(0), 1, &mut rng), 0);
    }
}
