use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub buttons: u8,
    pub length: usize,
    pub rounds_to_win: u32,
    /// Dark gap before each highlight.
    pub pause_ms: u32,
    /// How long each highlight stays lit.
    pub light_ms: u32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            buttons: 4,
            length: 4,
            rounds_to_win: 2,
            pause_ms: 400,
            light_ms: 500,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternState {
    Idle,
    ShowingPattern,
    AwaitingInput,
    WonRound,
    LostRound,
    GameOverWin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStep {
    Lit { button: u8, cue: Cue },
    Dark { cue: Cue },
    /// The whole sequence has been shown; input is now accepted.
    Finished,
}

impl PlaybackStep {
    pub const fn cue(self) -> Option<Cue> {
        match self {
            Self::Lit { cue, .. } | Self::Dark { cue } => Some(cue),
            Self::Finished => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Accepted { remaining: usize },
    RoundWon { rounds_won: u32 },
    RoundLost,
    GameWon,
}

impl PressOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::GameWon)
    }
}

/// Watch-then-repeat memory game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternRepeater {
    config: PatternConfig,
    state: PatternState,
    sequence: Sequence,
    input: Sequence,
    cursor: usize,
    lit: Option<u8>,
    rounds_won: u32,
    timer: TimerSlot,
    latch: WinLatch,
}

impl PatternRepeater {
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            state: PatternState::Idle,
            sequence: Sequence::new(),
            input: Sequence::new(),
            cursor: 0,
            lit: None,
            rounds_won: 0,
            timer: TimerSlot::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn state(&self) -> PatternState {
        self.state
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// Button currently highlighted by playback.
    pub fn lit(&self) -> Option<u8> {
        self.lit
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Round number being played, counting from one.
    pub fn round(&self) -> u32 {
        (self.rounds_won + 1).min(self.config.rounds_to_win)
    }

    /// Starts over from round one with a fresh sequence.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Cue {
        let sequence = generate_sequence(self.config.length, self.config.buttons, rng);
        self.restart();
        self.begin_round(sequence)
    }

    pub fn start_with(&mut self, sequence: Sequence) -> Result<Cue> {
        self.validate(&sequence)?;
        self.restart();
        Ok(self.begin_round(sequence))
    }

    /// Retry after a lost round; a full reset back to round one.
    pub fn retry<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Cue> {
        match self.state {
            PatternState::LostRound => Ok(self.start(rng)),
            _ => Err(GameError::NotAcceptingInput),
        }
    }

    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Cue> {
        let sequence = generate_sequence(self.config.length, self.config.buttons, rng);
        self.next_round_with(sequence)
    }

    pub fn next_round_with(&mut self, sequence: Sequence) -> Result<Cue> {
        match self.state {
            PatternState::WonRound => {
                self.validate(&sequence)?;
                Ok(self.begin_round(sequence))
            }
            PatternState::GameOverWin => Err(GameError::AlreadyEnded),
            _ => Err(GameError::NotAcceptingInput),
        }
    }

    /// Advances playback by one light-on or light-off step.
    pub fn advance_playback(&mut self, token: TimerToken) -> Result<PlaybackStep> {
        self.timer.fire(token)?;
        if !matches!(self.state, PatternState::ShowingPattern) {
            return Err(GameError::NotAcceptingInput);
        }

        if self.lit.take().is_some() {
            self.cursor += 1;
            if self.cursor < self.sequence.len() {
                return Ok(PlaybackStep::Dark {
                    cue: self.timer.cue(self.config.pause_ms),
                });
            }
        }

        let Some(&button) = self.sequence.get(self.cursor) else {
            self.state = PatternState::AwaitingInput;
            return Ok(PlaybackStep::Finished);
        };
        self.lit = Some(button);
        Ok(PlaybackStep::Lit {
            button,
            cue: self.timer.cue(self.config.light_ms),
        })
    }

    pub fn press(&mut self, button: u8) -> Result<PressOutcome> {
        if button >= self.config.buttons {
            return Err(GameError::InvalidButton);
        }
        match self.state {
            PatternState::AwaitingInput => {}
            PatternState::GameOverWin => return Err(GameError::AlreadyEnded),
            _ => return Err(GameError::NotAcceptingInput),
        }

        let index = self.input.len();
        self.input.push(button);

        if self.sequence.get(index) != Some(&button) {
            self.state = PatternState::LostRound;
            log::debug!("pattern round lost at step {}", index);
            return Ok(PressOutcome::RoundLost);
        }

        if self.input.len() < self.sequence.len() {
            return Ok(PressOutcome::Accepted {
                remaining: self.sequence.len() - self.input.len(),
            });
        }

        self.rounds_won += 1;
        if self.rounds_won >= self.config.rounds_to_win && self.latch.fire() {
            self.state = PatternState::GameOverWin;
            log::debug!("pattern game won");
            Ok(PressOutcome::GameWon)
        } else {
            self.state = PatternState::WonRound;
            Ok(PressOutcome::RoundWon {
                rounds_won: self.rounds_won,
            })
        }
    }

    /// Aborts playback and drops the pending timer. Rounds already won stay.
    pub fn stop(&mut self) {
        self.timer.cancel();
        self.lit = None;
        if matches!(
            self.state,
            PatternState::ShowingPattern | PatternState::AwaitingInput
        ) {
            self.state = PatternState::Idle;
        }
    }

    fn restart(&mut self) {
        self.rounds_won = 0;
        self.latch.rearm();
        log::debug!("pattern game started");
    }

    fn begin_round(&mut self, sequence: Sequence) -> Cue {
        self.sequence = sequence;
        self.input.clear();
        self.cursor = 0;
        self.lit = None;
        self.state = PatternState::ShowingPattern;
        self.timer.cue(self.config.pause_ms)
    }

    fn validate(&self, sequence: &[u8]) -> Result<()> {
        if sequence.is_empty() || sequence.iter().any(|&button| button >= self.config.buttons) {
            Err(GameError::InvalidButton)
        } else {
            Ok(())
        }
    }
}
