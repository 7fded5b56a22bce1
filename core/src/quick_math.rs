use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickMathConfig {
    /// Operands are drawn from `1..=operand_max`.
    pub operand_max: u32,
    /// False statements miss the answer by `1..=max_offset`.
    pub max_offset: u32,
    pub streak_to_win: u32,
    pub feedback_ms: u32,
}

impl Default for QuickMathConfig {
    fn default() -> Self {
        Self {
            operand_max: 10,
            max_offset: 3,
            streak_to_win: 3,
            feedback_ms: 1000,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickMathState {
    Answering,
    /// Showing whether the last judgment was right; the next problem loads
    /// when the feedback timer fires.
    Feedback { correct: bool },
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JudgeOutcome {
    Correct { streak: u32, next: Cue },
    Incorrect { next: Cue },
    Won,
}

impl JudgeOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn next(self) -> Option<Cue> {
        match self {
            Self::Correct { next, .. } | Self::Incorrect { next } => Some(next),
            Self::Won => None,
        }
    }
}

/// True-or-false arithmetic, won by a streak of right calls.
///
/// A wrong call drops the streak straight back to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickMath {
    config: QuickMathConfig,
    problem: Problem,
    streak: u32,
    state: QuickMathState,
    timer: TimerSlot,
    latch: WinLatch,
}

impl QuickMath {
    pub fn new<R: Rng + ?Sized>(config: QuickMathConfig, rng: &mut R) -> Self {
        let problem = generate_problem(&config, rng);
        Self::with_problem(config, problem)
    }

    pub fn with_problem(config: QuickMathConfig, problem: Problem) -> Self {
        Self {
            config,
            problem,
            streak: 0,
            state: QuickMathState::Answering,
            timer: TimerSlot::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn config(&self) -> &QuickMathConfig {
        &self.config
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn state(&self) -> QuickMathState {
        self.state
    }

    /// Judges the current statement as true (`claims_true`) or false.
    pub fn judge(&mut self, claims_true: bool) -> Result<JudgeOutcome> {
        match self.state {
            QuickMathState::Answering => {}
            QuickMathState::Feedback { .. } => return Err(GameError::NotAcceptingInput),
            QuickMathState::Won => return Err(GameError::AlreadyEnded),
        }

        let correct = claims_true == self.problem.is_true();
        log::trace!("judged {} as {}: correct={}", self.problem, claims_true, correct);

        if !correct {
            self.streak = 0;
            self.state = QuickMathState::Feedback { correct };
            return Ok(JudgeOutcome::Incorrect {
                next: self.timer.cue(self.config.feedback_ms),
            });
        }

        self.streak += 1;
        if self.streak >= self.config.streak_to_win && self.latch.fire() {
            self.timer.cancel();
            self.state = QuickMathState::Won;
            log::debug!("quick math won");
            return Ok(JudgeOutcome::Won);
        }

        self.state = QuickMathState::Feedback { correct };
        Ok(JudgeOutcome::Correct {
            streak: self.streak,
            next: self.timer.cue(self.config.feedback_ms),
        })
    }

    /// Loads a freshly generated problem once the feedback pause is over.
    pub fn next_problem<R: Rng + ?Sized>(
        &mut self,
        token: TimerToken,
        rng: &mut R,
    ) -> Result<&Problem> {
        let problem = generate_problem(&self.config, rng);
        self.next_problem_with(token, problem)
    }

    pub fn next_problem_with(&mut self, token: TimerToken, problem: Problem) -> Result<&Problem> {
        self.timer.fire(token)?;
        if !matches!(self.state, QuickMathState::Feedback { .. }) {
            return Err(GameError::NotAcceptingInput);
        }
        self.problem = problem;
        self.state = QuickMathState::Answering;
        Ok(&self.problem)
    }

    /// New problem, zero streak, win re-armed.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.timer.cancel();
        self.problem = generate_problem(&self.config, rng);
        self.streak = 0;
        self.state = QuickMathState::Answering;
        self.latch.rearm();
        log::debug!("quick math restarted");
    }

    /// Drops the pending feedback timer. The streak is kept.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn answer(game: &mut QuickMath, correctly: bool, follow_up: Problem) -> JudgeOutcome {
        let truth = game.problem().is_true();
        let outcome = game.judge(if correctly { truth } else { !truth }).unwrap();
        if let Some(cue) = outcome.next() {
            game.next_problem_with(cue.token, follow_up).unwrap();
        }
        outcome
    }

    fn sample() -> Problem {
        Problem::new(2, Operator::Multiply, 6, 12)
    }

    #[test]
    fn wrong_call_resets_streak_and_loads_next_problem() {
        let mut game = QuickMath::with_problem(
            QuickMathConfig::default(),
            Problem::new(4, Operator::Add, 5, 9),
        );

        let outcome = game.judge(true).unwrap();
        let JudgeOutcome::Correct { streak: 1, next } = outcome else {
            panic!("unexpected {:?}", outcome);
        };
        assert_eq!(next.delay_ms, 1000);
        assert_eq!(game.judge(true), Err(GameError::NotAcceptingInput));

        game.next_problem_with(next.token, Problem::new(3, Operator::Multiply, 3, 8))
            .unwrap();
        assert!(!game.problem().is_true());
        assert_eq!(game.state(), QuickMathState::Answering);

        let outcome = game.judge(true).unwrap();
        assert!(matches!(outcome, JudgeOutcome::Incorrect { .. }));
        assert_eq!(game.streak(), 0);
        assert_eq!(game.state(), QuickMathState::Feedback { correct: false });

        let mut rng = SmallRng::seed_from_u64(1);
        game.next_problem(outcome.next().unwrap().token, &mut rng)
            .unwrap();
        assert_eq!(game.state(), QuickMathState::Answering);
    }

    #[test]
    fn streak_of_two_then_miss_needs_three_more() {
        let mut game = QuickMath::with_problem(QuickMathConfig::default(), sample());

        answer(&mut game, true, sample());
        answer(&mut game, true, sample());
        assert_eq!(game.streak(), 2);

        answer(&mut game, false, sample());
        assert_eq!(game.streak(), 0);

        assert!(!answer(&mut game, true, sample()).is_win());
        assert_eq!(game.streak(), 1);
        assert!(!answer(&mut game, true, sample()).is_win());
        assert!(answer(&mut game, true, sample()).is_win());
        assert_eq!(game.state(), QuickMathState::Won);
    }

    #[test]
    fn won_game_ignores_further_judgments() {
        let mut game = QuickMath::with_problem(QuickMathConfig::default(), sample());
        for _ in 0..3 {
            answer(&mut game, true, sample());
        }

        assert_eq!(game.judge(true), Err(GameError::AlreadyEnded));
        assert_eq!(game.judge(false), Err(GameError::AlreadyEnded));
        assert_eq!(game.streak(), 3);
    }

    #[test]
    fn stale_feedback_timer_is_refused_after_stop() {
        let mut game = QuickMath::with_problem(QuickMathConfig::default(), sample());
        let cue = game.judge(true).unwrap().next().unwrap();

        game.stop();
        assert_eq!(
            game.next_problem_with(cue.token, sample()).map(|p| *p),
            Err(GameError::StaleTimer)
        );
        assert_eq!(game.streak(), 1);
    }

    #[test]
    fn restart_rearms_the_win() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = QuickMath::with_problem(QuickMathConfig::default(), sample());
        for _ in 0..3 {
            answer(&mut game, true, sample());
        }

        game.restart(&mut rng);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.state(), QuickMathState::Answering);

        let follow_up = *game.problem();
        answer(&mut game, true, follow_up);
        answer(&mut game, true, follow_up);
        assert!(answer(&mut game, true, follow_up).is_win());
    }
}
