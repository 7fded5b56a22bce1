use super::{GameProps, schedule};
use crate::utils::*;
use codegate_core::{HintState, ScrambleConfig, ScrambleState, SubmitOutcome, TimerToken, WordScramble};
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub(crate) enum Msg {
    Input(String),
    Submit,
    Hint,
    HintReady(TimerToken),
    Reset,
}

pub(crate) struct WordScrambleGame {
    game: WordScramble,
    rng: SmallRng,
    guess: String,
    last: Option<SubmitOutcome>,
    hint: Option<Timeout>,
}

impl Component for WordScrambleGame {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut rng = ctx.props().rng();
        Self {
            game: WordScramble::new(ScrambleConfig::default(), &mut rng),
            rng,
            guess: String::new(),
            last: None,
            hint: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(guess) => {
                self.guess = guess;
                false
            }
            Msg::Submit => match self.game.submit(&self.guess).accepted() {
                Some(outcome) => {
                    if outcome.is_win() {
                        self.hint = None;
                        ctx.props().on_win.emit(());
                    }
                    self.last = Some(outcome);
                    outcome.has_update()
                }
                None => false,
            },
            Msg::Hint => match self.game.request_hint().accepted() {
                Some(cue) => {
                    self.hint = Some(schedule(ctx.link(), cue, Msg::HintReady));
                    true
                }
                None => false,
            },
            Msg::HintReady(token) => {
                self.hint = None;
                self.game.reveal_hint(token).accepted().is_some()
            }
            Msg::Reset => {
                self.hint = None;
                self.game.reset(&mut self.rng);
                self.guess.clear();
                self.last = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let won = matches!(self.game.state(), ScrambleState::Won);

        let oninput = ctx.link().callback(|e: InputEvent| {
            Msg::Input(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        let hint = match self.game.hint_state() {
            HintState::Available => html! {
                <button class="hint" onclick={ctx.link().callback(|_| Msg::Hint)} disabled={won}>
                    {"Hint"}
                </button>
            },
            HintState::Pending => html! { <p class="hint pending">{"Thinking..."}</p> },
            HintState::Revealed => html! {
                <p class="hint">{self.game.hint().unwrap_or_default().to_string()}</p>
            },
        };

        let feedback = match self.last {
            Some(SubmitOutcome::Correct) => html! {
                <p class="feedback good">{format!("{} it is!", self.game.target())}</p>
            },
            Some(SubmitOutcome::Incorrect) => html! { <p class="feedback bad">{"Not quite."}</p> },
            None => html! {},
        };

        html! {
            <div class="word-scramble">
                <p class="scrambled">
                    { for self.game.scrambled().chars().map(|letter| html! { <span>{letter.to_string()}</span> }) }
                </p>
                <form {onsubmit}>
                    <input
                        type="text"
                        value={self.guess.clone()}
                        {oninput}
                        disabled={won}
                        autocomplete="off"
                        placeholder="Unscramble me"
                    />
                    <button type="submit" disabled={won}>{"Submit"}</button>
                </form>
                {hint}
                {feedback}
                if won {
                    <button onclick={ctx.link().callback(|_| Msg::Reset)}>{"New scramble"}</button>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.hint = None;
        self.game.stop();
    }
}
