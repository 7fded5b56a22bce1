use rand::Rng;
use smallvec::SmallVec;

/// Ordered button indices of one pattern round.
pub type Sequence = SmallVec<[u8; 8]>;

/// A round always has at least one step.
pub fn generate_sequence<R: Rng + ?Sized>(length: usize, buttons: u8, rng: &mut R) -> Sequence {
    let buttons = buttons.max(1);
    (0..length.max(1)).map(|_| rng.random_range(0..buttons)).collect()
}
