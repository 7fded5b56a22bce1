use super::{GameProps, schedule};
use crate::utils::*;
use codegate_core::{JudgeOutcome, QuickMath, QuickMathConfig, QuickMathState, TimerToken};
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use yew::prelude::*;

#[derive(Copy, Clone, Debug)]
pub(crate) enum Msg {
    Judge(bool),
    Next(TimerToken),
    Restart,
}

pub(crate) struct QuickMathGame {
    game: QuickMath,
    rng: SmallRng,
    feedback: Option<Timeout>,
}

impl Component for QuickMathGame {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut rng = ctx.props().rng();
        Self {
            game: QuickMath::new(QuickMathConfig::default(), &mut rng),
            rng,
            feedback: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Judge(claims_true) => match self.game.judge(claims_true).accepted() {
                Some(JudgeOutcome::Won) => {
                    self.feedback = None;
                    ctx.props().on_win.emit(());
                    true
                }
                Some(outcome) => {
                    self.feedback = outcome
                        .next()
                        .map(|cue| schedule(ctx.link(), cue, Msg::Next));
                    outcome.has_update()
                }
                None => false,
            },
            Msg::Next(token) => {
                self.feedback = None;
                self.game.next_problem(token, &mut self.rng).accepted().is_some()
            }
            Msg::Restart => {
                self.feedback = None;
                self.game.restart(&mut self.rng);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = self.game.state();
        let answering = matches!(state, QuickMathState::Answering);

        let feedback = match state {
            QuickMathState::Answering => html! {},
            QuickMathState::Feedback { correct: true } => html! { <p class="feedback good">{"Correct!"}</p> },
            QuickMathState::Feedback { correct: false } => html! { <p class="feedback bad">{"Nope, streak reset."}</p> },
            QuickMathState::Won => html! { <p class="feedback good">{"Math whiz!"}</p> },
        };

        html! {
            <div class="quick-math">
                <p class="problem">{self.game.problem().to_string()}</p>
                <div class="answers">
                    <button onclick={ctx.link().callback(|_| Msg::Judge(true))} disabled={!answering}>
                        {"True"}
                    </button>
                    <button onclick={ctx.link().callback(|_| Msg::Judge(false))} disabled={!answering}>
                        {"False"}
                    </button>
                </div>
                {feedback}
                <p class="status">
                    {format!("Streak: {}/{}", self.game.streak(), self.game.config().streak_to_win)}
                </p>
                if matches!(state, QuickMathState::Won) {
                    <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Play again"}</button>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.feedback = None;
        self.game.stop();
    }
}
