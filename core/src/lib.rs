#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use click_target::*;
pub use creature::*;
pub use error::*;
pub use gauntlet::*;
pub use generator::*;
pub use pattern::*;
pub use puzzle::*;
pub use quick_math::*;
pub use roster::*;
pub use timer::*;
pub use word_scramble::*;

mod click_target;
mod creature;
mod error;
mod gauntlet;
mod generator;
mod pattern;
mod puzzle;
mod quick_math;
mod roster;
mod timer;
mod word_scramble;

/// The closed set of minigames behind the code gate, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameId {
    SlidingPuzzle,
    ClickTarget,
    PatternRepeater,
    QuickMath,
    WordScramble,
}

impl GameId {
    pub const ALL: [GameId; 5] = [
        Self::SlidingPuzzle,
        Self::ClickTarget,
        Self::PatternRepeater,
        Self::QuickMath,
        Self::WordScramble,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn title(self) -> &'static str {
        use GameId::*;
        match self {
            SlidingPuzzle => "Sliding Puzzle",
            ClickTarget => "Click the Target",
            PatternRepeater => "Pattern Repeater",
            QuickMath => "Quick Math",
            WordScramble => "Word Scramble",
        }
    }

    /// Stable identifier used for DOM ids and anchors.
    pub const fn slug(self) -> &'static str {
        use GameId::*;
        match self {
            SlidingPuzzle => "slidingPuzzle",
            ClickTarget => "clickTarget",
            PatternRepeater => "patternRepeater",
            QuickMath => "quickMath",
            WordScramble => "wordScramble",
        }
    }
}

/// Gate that lets a game report its win once per episode.
///
/// Only an explicit restart re-arms it, so repeated qualifying input after a
/// win can never produce a second winning outcome.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLatch {
    fired: bool,
}

impl WinLatch {
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Returns `true` only on the first call since the last [`rearm`](Self::rearm).
    pub fn fire(&mut self) -> bool {
        !core::mem::replace(&mut self.fired, true)
    }

    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn rearm(&mut self) {
        self.fired = false;
    }
}
