use codegate_core::{Cue, TimerToken};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::html::Scope;
use yew::prelude::*;

pub(crate) use click_target::ClickTargetGame;
pub(crate) use pattern::PatternGame;
pub(crate) use puzzle::PuzzleGame;
pub(crate) use quick_math::QuickMathGame;
pub(crate) use word_scramble::WordScrambleGame;

mod click_target;
mod pattern;
mod puzzle;
mod quick_math;
mod word_scramble;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: u64,
    /// Called once per win.
    pub on_win: Callback<()>,
}

impl GameProps {
    fn rng(&self) -> SmallRng {
        SmallRng::seed_from_u64(self.seed)
    }
}

/// Starts the browser timer behind `cue`. Dropping the handle cancels it.
fn schedule<C, F>(link: &Scope<C>, cue: Cue, msg: F) -> Timeout
where
    C: Component,
    F: FnOnce(TimerToken) -> C::Message + 'static,
{
    let link = link.clone();
    Timeout::new(cue.delay_ms, move || link.send_message(msg(cue.token)))
}
