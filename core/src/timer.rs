use serde::{Deserialize, Serialize};

use crate::*;

/// Handle for one armed suspension point.
///
/// Only the most recently armed token of a [`TimerSlot`] is live; anything
/// older is stale and will be refused when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u32);

/// A token together with how long the front end should wait before firing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub token: TimerToken,
    pub delay_ms: u32,
}

/// At most one pending timer per slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerSlot {
    epoch: u32,
    live: Option<TimerToken>,
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self {
            epoch: 0,
            live: None,
        }
    }

    /// Cancels whatever is pending and hands out a fresh token.
    pub fn arm(&mut self) -> TimerToken {
        self.epoch = self.epoch.wrapping_add(1);
        let token = TimerToken(self.epoch);
        if let Some(stale) = self.live.replace(token) {
            log::trace!("timer {:?} superseded by {:?}", stale, token);
        }
        token
    }

    pub fn cue(&mut self, delay_ms: u32) -> Cue {
        Cue {
            token: self.arm(),
            delay_ms,
        }
    }

    /// Returns whether a pending timer was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.live.take().is_some()
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.live
    }

    pub fn is_pending(&self) -> bool {
        self.live.is_some()
    }

    /// Consumes `token` if it is the live one.
    pub fn fire(&mut self, token: TimerToken) -> Result<()> {
        if self.live == Some(token) {
            self.live = None;
            Ok(())
        } else {
            log::trace!("ignoring stale timer {:?}", token);
            Err(GameError::StaleTimer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_token_fires_once() {
        let mut slot = TimerSlot::new();
        let token = slot.arm();

        assert!(slot.is_pending());
        assert_eq!(slot.fire(token), Ok(()));
        assert!(!slot.is_pending());
        assert_eq!(slot.fire(token), Err(GameError::StaleTimer));
    }

    #[test]
    fn cancelled_token_is_stale() {
        let mut slot = TimerSlot::new();
        let token = slot.arm();

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert_eq!(slot.fire(token), Err(GameError::StaleTimer));
    }

    #[test]
    fn rearming_supersedes_previous_token() {
        let mut slot = TimerSlot::new();
        let first = slot.arm();
        let second = slot.cue(250);

        assert_ne!(first, second.token);
        assert_eq!(second.delay_ms, 250);
        assert_eq!(slot.pending(), Some(second.token));
        assert_eq!(slot.fire(first), Err(GameError::StaleTimer));
        assert_eq!(slot.fire(second.token), Ok(()));
    }
}
