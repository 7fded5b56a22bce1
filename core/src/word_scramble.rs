use alloc::string::String;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambleConfig {
    pub word: String,
    pub hint: String,
    pub max_attempts: u32,
    pub hint_delay_ms: u32,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            word: "MILKYWAY-GALAXY".into(),
            hint: "Our home galaxy, spelled with a hyphen.".into(),
            max_attempts: 10,
            hint_delay_ms: 1500,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintState {
    Available,
    /// Requested, waiting for the reveal delay.
    Pending,
    Revealed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrambleState {
    Playing,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Incorrect,
    Correct,
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Correct)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordScramble {
    config: ScrambleConfig,
    target: String,
    scrambled: String,
    hint_state: HintState,
    state: ScrambleState,
    wrong_guesses: u32,
    timer: TimerSlot,
    latch: WinLatch,
}

impl WordScramble {
    pub fn new<R: Rng + ?Sized>(config: ScrambleConfig, rng: &mut R) -> Self {
        let target = config.word.to_uppercase();
        let scrambled = scramble_word(&target, config.max_attempts, rng);
        Self {
            config,
            target,
            scrambled,
            hint_state: HintState::Available,
            state: ScrambleState::Playing,
            wrong_guesses: 0,
            timer: TimerSlot::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    /// The answer; only meant for display once the game is won.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> ScrambleState {
        self.state
    }

    pub fn hint_state(&self) -> HintState {
        self.hint_state
    }

    pub fn hint(&self) -> Option<&str> {
        match self.hint_state {
            HintState::Revealed => Some(&self.config.hint),
            _ => None,
        }
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    /// Case-insensitive, whole-string comparison against the target word.
    pub fn submit(&mut self, guess: &str) -> Result<SubmitOutcome> {
        if matches!(self.state, ScrambleState::Won) {
            return Err(GameError::AlreadyEnded);
        }

        if guess.to_uppercase() != self.target {
            self.wrong_guesses += 1;
            return Ok(SubmitOutcome::Incorrect);
        }

        if !self.latch.fire() {
            return Err(GameError::AlreadyEnded);
        }
        self.stop();
        self.state = ScrambleState::Won;
        log::debug!("word scramble solved after {} wrong guesses", self.wrong_guesses);
        Ok(SubmitOutcome::Correct)
    }

    /// Asks for the one hint this round allows.
    pub fn request_hint(&mut self) -> Result<Cue> {
        if matches!(self.state, ScrambleState::Won) {
            return Err(GameError::AlreadyEnded);
        }
        if !matches!(self.hint_state, HintState::Available) {
            return Err(GameError::HintAlreadyUsed);
        }
        self.hint_state = HintState::Pending;
        Ok(self.timer.cue(self.config.hint_delay_ms))
    }

    pub fn reveal_hint(&mut self, token: TimerToken) -> Result<&str> {
        self.timer.fire(token)?;
        self.hint_state = HintState::Revealed;
        Ok(&self.config.hint)
    }

    /// Fresh scramble of the same word with the hint available again.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.timer.cancel();
        self.scrambled = scramble_word(&self.target, self.config.max_attempts, rng);
        self.hint_state = HintState::Available;
        self.state = ScrambleState::Playing;
        self.wrong_guesses = 0;
        self.latch.rearm();
        log::debug!("word scramble reset");
    }

    /// Cancels a pending hint reveal; the hint counts as unused again.
    pub fn stop(&mut self) {
        if self.timer.cancel() && matches!(self.hint_state, HintState::Pending) {
            self.hint_state = HintState::Available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn game(seed: u64) -> WordScramble {
        let mut rng = SmallRng::seed_from_u64(seed);
        WordScramble::new(ScrambleConfig::default(), &mut rng)
    }

    #[test]
    fn scramble_meets_fixed_character_limit() {
        for seed in 0..100 {
            let game = game(seed);
            assert_eq!(game.target(), "MILKYWAY-GALAXY");
            assert!(count_fixed_chars(game.target(), game.scrambled()) <= 3);
        }
    }

    #[test]
    fn lowercase_guess_wins_once() {
        let mut game = game(1);

        assert_eq!(game.submit("milkyway galaxy").unwrap(), SubmitOutcome::Incorrect);
        assert_eq!(game.submit("milkyway-galaxy").unwrap(), SubmitOutcome::Correct);
        assert_eq!(game.state(), ScrambleState::Won);
        assert_eq!(game.submit("MILKYWAY-GALAXY"), Err(GameError::AlreadyEnded));
        assert_eq!(game.wrong_guesses(), 1);
    }

    #[test]
    fn partial_guess_is_wrong() {
        let mut game = game(2);
        assert_eq!(game.submit("MILKYWAY").unwrap(), SubmitOutcome::Incorrect);
        assert_eq!(game.submit("").unwrap(), SubmitOutcome::Incorrect);
        assert_eq!(game.state(), ScrambleState::Playing);
    }

    #[test]
    fn hint_is_one_shot_until_reset() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut game = game(3);

        let cue = game.request_hint().unwrap();
        assert_eq!(cue.delay_ms, 1500);
        assert_eq!(game.hint(), None);
        assert_eq!(game.request_hint(), Err(GameError::HintAlreadyUsed));

        assert!(game.reveal_hint(cue.token).unwrap().contains("galaxy"));
        assert!(game.hint().is_some());
        assert_eq!(game.request_hint(), Err(GameError::HintAlreadyUsed));

        game.reset(&mut rng);
        assert_eq!(game.hint_state(), HintState::Available);
        assert!(game.request_hint().is_ok());
    }

    #[test]
    fn reset_after_win_allows_playing_again() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut game = game(4);
        let cue = game.request_hint().unwrap();
        game.submit("MILKYWAY-GALAXY").unwrap();

        game.reset(&mut rng);
        assert_eq!(game.state(), ScrambleState::Playing);
        assert_eq!(game.reveal_hint(cue.token), Err(GameError::StaleTimer));
        assert!(count_fixed_chars(game.target(), game.scrambled()) <= 3);
        assert_eq!(game.submit("MilkyWay-Galaxy").unwrap(), SubmitOutcome::Correct);
    }

    #[test]
    fn winning_cancels_a_pending_hint() {
        let mut game = game(6);
        let cue = game.request_hint().unwrap();

        assert!(game.submit("milkyway-galaxy").unwrap().is_win());
        assert_eq!(game.hint_state(), HintState::Available);
        assert_eq!(game.reveal_hint(cue.token), Err(GameError::StaleTimer));
        assert_eq!(game.hint(), None);
        assert_eq!(game.request_hint(), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn stopping_a_pending_hint_gives_it_back() {
        let mut game = game(5);
        let cue = game.request_hint().unwrap();

        game.stop();
        assert_eq!(game.hint_state(), HintState::Available);
        assert_eq!(game.reveal_hint(cue.token), Err(GameError::StaleTimer));
    }
}
