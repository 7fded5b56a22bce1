use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

/// Most characters a scramble of `len` characters may leave in place.
pub const fn fixed_char_limit(len: usize) -> usize {
    // floor(len * 0.2), capped at three
    let limit = len / 5;
    if limit < 3 { limit } else { 3 }
}

/// Counts positions where both strings hold the same character.
pub fn count_fixed_chars(original: &str, scrambled: &str) -> usize {
    original
        .chars()
        .zip(scrambled.chars())
        .filter(|(a, b)| a == b)
        .count()
}

/// Shuffles the characters of `word` until at most
/// [`fixed_char_limit`] of them keep their original position.
///
/// At most `max_attempts` shuffles are made (at least one). When none of them
/// satisfies the limit, the candidate with the fewest fixed characters wins.
pub fn scramble_word<R: Rng + ?Sized>(word: &str, max_attempts: u32, rng: &mut R) -> String {
    let original: Vec<char> = word.chars().collect();
    let limit = fixed_char_limit(original.len());

    let mut best: Option<(usize, Vec<char>)> = None;
    let mut candidate = original.clone();

    for _ in 0..max_attempts.max(1) {
        candidate.shuffle(rng);
        let fixed = original
            .iter()
            .zip(&candidate)
            .filter(|(a, b)| a == b)
            .count();

        if fixed <= limit {
            return candidate.into_iter().collect();
        }
        if best.as_ref().is_none_or(|(best_fixed, _)| fixed < *best_fixed) {
            best = Some((fixed, candidate.clone()));
        }
    }

    let (fixed, chars) = best.unwrap_or((original.len(), original));
    log::warn!(
        "Scramble of {} characters kept {} in place (limit {}) after {} attempts",
        chars.len(),
        fixed,
        limit,
        max_attempts
    );
    chars.into_iter().collect()
}
