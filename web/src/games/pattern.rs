use super::{GameProps, schedule};
use crate::utils::*;
use codegate_core::{Cue, PatternConfig, PatternRepeater, PatternState, PressOutcome, TimerToken};
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use yew::prelude::*;

const BUTTON_COLORS: [&str; 4] = ["red", "green", "blue", "yellow"];

#[derive(Copy, Clone, Debug)]
pub(crate) enum Msg {
    Start,
    Retry,
    NextRound,
    Playback(TimerToken),
    Press(u8),
}

pub(crate) struct PatternGame {
    game: PatternRepeater,
    rng: SmallRng,
    playback: Option<Timeout>,
}

impl PatternGame {
    fn play(&mut self, ctx: &Context<Self>, cue: Cue) {
        self.playback = Some(schedule(ctx.link(), cue, Msg::Playback));
    }

    fn status(&self) -> String {
        let rounds = self.game.config().rounds_to_win;
        match self.game.state() {
            PatternState::Idle => "Watch the lights, then repeat them.".into(),
            PatternState::ShowingPattern => format!("Round {}/{}: watch...", self.game.round(), rounds),
            PatternState::AwaitingInput => format!(
                "Round {}/{}: your turn ({} left)",
                self.game.round(),
                rounds,
                self.game.sequence().len() - self.game.input().len()
            ),
            PatternState::WonRound => format!("Round cleared! {}/{}", self.game.rounds_won(), rounds),
            PatternState::LostRound => "Wrong light. Back to round one.".into(),
            PatternState::GameOverWin => "Pattern mastered!".into(),
        }
    }
}

impl Component for PatternGame {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: PatternRepeater::new(PatternConfig::default()),
            rng: ctx.props().rng(),
            playback: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Start => {
                let cue = self.game.start(&mut self.rng);
                self.play(ctx, cue);
                true
            }
            Msg::Retry => match self.game.retry(&mut self.rng).accepted() {
                Some(cue) => {
                    self.play(ctx, cue);
                    true
                }
                None => false,
            },
            Msg::NextRound => match self.game.next_round(&mut self.rng).accepted() {
                Some(cue) => {
                    self.play(ctx, cue);
                    true
                }
                None => false,
            },
            Msg::Playback(token) => match self.game.advance_playback(token).accepted() {
                Some(step) => {
                    match step.cue() {
                        Some(cue) => self.play(ctx, cue),
                        None => self.playback = None,
                    }
                    true
                }
                None => false,
            },
            Msg::Press(button) => match self.game.press(button).accepted() {
                Some(outcome) => {
                    if let PressOutcome::GameWon = outcome {
                        ctx.props().on_win.emit(());
                    }
                    outcome.has_update()
                }
                None => false,
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = self.game.state();
        let lit = self.game.lit();
        let accepting = matches!(state, PatternState::AwaitingInput);

        let buttons = (0..self.game.config().buttons).map(|button| {
            let color = BUTTON_COLORS[usize::from(button) % BUTTON_COLORS.len()];
            let class = classes!("pad", color, (lit == Some(button)).then_some("lit"));
            let onclick = ctx.link().callback(move |_| Msg::Press(button));
            html! { <button {class} {onclick} disabled={!accepting}/> }
        });

        let action = match state {
            PatternState::Idle => Some(("Start", Msg::Start)),
            PatternState::WonRound => Some(("Next round", Msg::NextRound)),
            PatternState::LostRound => Some(("Try again", Msg::Retry)),
            PatternState::GameOverWin => Some(("Play again", Msg::Start)),
            PatternState::ShowingPattern | PatternState::AwaitingInput => None,
        };

        html! {
            <div class="pattern">
                <div class="pads">{ for buttons }</div>
                <p class="status">{self.status()}</p>
                if let Some((label, msg)) = action {
                    <button onclick={ctx.link().callback(move |_| msg)}>{label}</button>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.playback = None;
        self.game.stop();
    }
}
