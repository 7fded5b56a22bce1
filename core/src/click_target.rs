use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTargetConfig {
    pub grid_cells: u8,
    pub hits_to_win: u32,
    pub initial_visible_ms: u32,
    /// Subtracted from the visible duration after every hit.
    pub step_ms: u32,
    pub min_visible_ms: u32,
}

impl Default for ClickTargetConfig {
    fn default() -> Self {
        Self {
            grid_cells: 16,
            hits_to_win: 10,
            initial_visible_ms: 1200,
            step_ms: 75,
            min_visible_ms: 600,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTargetState {
    Idle,
    Active,
    Completed,
}

/// A target placed on `cell`, expiring when `cue` fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub cell: u8,
    pub cue: Cue,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Clicked a cell without the target.
    Miss,
    Hit(Spawn),
    Completed,
}

impl HitOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Miss)
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickTarget {
    config: ClickTargetConfig,
    state: ClickTargetState,
    target: Option<u8>,
    previous: Option<u8>,
    hits: u32,
    expired: u32,
    visible_ms: u32,
    timer: TimerSlot,
    latch: WinLatch,
}

impl ClickTarget {
    pub fn new(config: ClickTargetConfig) -> Self {
        Self {
            config,
            state: ClickTargetState::Idle,
            target: None,
            previous: None,
            hits: 0,
            expired: 0,
            visible_ms: config.initial_visible_ms,
            timer: TimerSlot::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn config(&self) -> &ClickTargetConfig {
        &self.config
    }

    pub fn state(&self) -> ClickTargetState {
        self.state
    }

    pub fn target(&self) -> Option<u8> {
        self.target
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Targets that timed out unclicked. No penalty is attached to them.
    pub fn expired(&self) -> u32 {
        self.expired
    }

    /// How long the next target stays up.
    pub fn visible_ms(&self) -> u32 {
        self.visible_ms
    }

    /// (Re)starts a run from zero hits and the initial duration.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Spawn {
        self.hits = 0;
        self.expired = 0;
        self.visible_ms = self.config.initial_visible_ms;
        self.latch.rearm();
        self.state = ClickTargetState::Active;
        log::debug!("click target started");
        self.spawn(rng)
    }

    /// Cancels the pending expiry and clears the target; hits are kept.
    pub fn stop(&mut self) {
        self.timer.cancel();
        self.clear_target();
        if matches!(self.state, ClickTargetState::Active) {
            self.state = ClickTargetState::Idle;
        }
    }

    pub fn click<R: Rng + ?Sized>(&mut self, cell: u8, rng: &mut R) -> Result<HitOutcome> {
        if cell >= self.config.grid_cells {
            return Err(GameError::InvalidCell);
        }
        self.check_active()?;

        if self.target != Some(cell) {
            return Ok(HitOutcome::Miss);
        }

        self.timer.cancel();
        self.hits += 1;
        log::trace!("hit {} at cell {}", self.hits, cell);

        if self.hits >= self.config.hits_to_win && self.latch.fire() {
            self.clear_target();
            self.state = ClickTargetState::Completed;
            log::debug!("click target completed");
            return Ok(HitOutcome::Completed);
        }

        self.visible_ms = self
            .visible_ms
            .saturating_sub(self.config.step_ms)
            .max(self.config.min_visible_ms);
        Ok(HitOutcome::Hit(self.spawn(rng)))
    }

    /// Replaces a target whose visible time ran out.
    pub fn expire<R: Rng + ?Sized>(&mut self, token: TimerToken, rng: &mut R) -> Result<Spawn> {
        self.timer.fire(token)?;
        self.check_active()?;
        self.expired += 1;
        Ok(self.spawn(rng))
    }

    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Spawn {
        let cell = next_target_cell(self.previous, self.config.grid_cells, rng);
        self.target = Some(cell);
        self.previous = Some(cell);
        Spawn {
            cell,
            cue: self.timer.cue(self.visible_ms),
        }
    }

    fn clear_target(&mut self) {
        self.target = None;
    }

    fn check_active(&self) -> Result<()> {
        match self.state {
            ClickTargetState::Active => Ok(()),
            ClickTargetState::Idle => Err(GameError::NotAcceptingInput),
            ClickTargetState::Completed => Err(GameError::AlreadyEnded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn hit_current(game: &mut ClickTarget, rng: &mut SmallRng) -> HitOutcome {
        let cell = game.target().unwrap();
        game.click(cell, rng).unwrap()
    }

    #[test]
    fn ten_hits_complete_the_game_once() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut game = ClickTarget::new(ClickTargetConfig::default());
        game.start(&mut rng);

        for _ in 0..9 {
            assert!(matches!(hit_current(&mut game, &mut rng), HitOutcome::Hit(_)));
        }
        assert_eq!(hit_current(&mut game, &mut rng), HitOutcome::Completed);
        assert_eq!(game.state(), ClickTargetState::Completed);
        assert_eq!(game.target(), None);
        assert_eq!(game.hits(), 10);
        assert_eq!(game.click(0, &mut rng), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn spawns_never_repeat_the_previous_cell() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = ClickTarget::new(ClickTargetConfig::default());
        let mut spawn = game.start(&mut rng);

        for _ in 0..200 {
            let next = game.expire(spawn.cue.token, &mut rng).unwrap();
            assert_ne!(next.cell, spawn.cell);
            spawn = next;
        }
        assert_eq!(game.expired(), 200);
        assert_eq!(game.hits(), 0);
    }

    #[test]
    fn visible_duration_never_drops_below_floor() {
        let config = ClickTargetConfig {
            hits_to_win: 40,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let mut game = ClickTarget::new(config);
        let first = game.start(&mut rng);
        assert_eq!(first.cue.delay_ms, 1200);

        let mut previous = first.cue.delay_ms;
        for _ in 0..30 {
            let HitOutcome::Hit(spawn) = hit_current(&mut game, &mut rng) else {
                panic!("expected another spawn");
            };
            assert!(spawn.cue.delay_ms >= 600);
            assert!(spawn.cue.delay_ms <= previous);
            previous = spawn.cue.delay_ms;
        }
        assert_eq!(game.visible_ms(), 600);
    }

    #[test]
    fn wrong_cell_is_a_miss_without_side_effects() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut game = ClickTarget::new(ClickTargetConfig::default());
        let spawn = game.start(&mut rng);
        let wrong = (spawn.cell + 1) % 16;

        assert_eq!(game.click(wrong, &mut rng).unwrap(), HitOutcome::Miss);
        assert_eq!(game.hits(), 0);
        assert_eq!(game.target(), Some(spawn.cell));
        assert_eq!(game.click(16, &mut rng), Err(GameError::InvalidCell));
    }

    #[test]
    fn hit_cancels_pending_expiry() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut game = ClickTarget::new(ClickTargetConfig::default());
        let spawn = game.start(&mut rng);

        hit_current(&mut game, &mut rng);
        assert_eq!(
            game.expire(spawn.cue.token, &mut rng),
            Err(GameError::StaleTimer)
        );
        assert_eq!(game.expired(), 0);
    }

    #[test]
    fn stop_keeps_hits_and_restart_clears_them() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut game = ClickTarget::new(ClickTargetConfig::default());
        game.start(&mut rng);
        hit_current(&mut game, &mut rng);
        let HitOutcome::Hit(pending) = hit_current(&mut game, &mut rng) else {
            panic!("expected another spawn");
        };

        game.stop();
        assert_eq!(game.state(), ClickTargetState::Idle);
        assert_eq!(game.target(), None);
        assert_eq!(game.hits(), 2);
        assert_eq!(
            game.expire(pending.cue.token, &mut rng),
            Err(GameError::StaleTimer)
        );
        assert_eq!(game.click(0, &mut rng), Err(GameError::NotAcceptingInput));

        let spawn = game.start(&mut rng);
        assert_eq!(game.hits(), 0);
        assert_eq!(spawn.cue.delay_ms, 1200);
    }
}
