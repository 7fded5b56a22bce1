use super::{GameProps, schedule};
use crate::utils::*;
use codegate_core::{ClickTarget, ClickTargetConfig, ClickTargetState, HitOutcome, Spawn, TimerToken};
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use yew::prelude::*;

#[derive(Copy, Clone, Debug)]
pub(crate) enum Msg {
    Start,
    Stop,
    Click(u8),
    Expired(TimerToken),
}

pub(crate) struct ClickTargetGame {
    game: ClickTarget,
    rng: SmallRng,
    expiry: Option<Timeout>,
}

impl ClickTargetGame {
    fn arm(&mut self, ctx: &Context<Self>, spawn: Spawn) {
        log::trace!("target at {} for {} ms", spawn.cell, spawn.cue.delay_ms);
        self.expiry = Some(schedule(ctx.link(), spawn.cue, Msg::Expired));
    }
}

impl Component for ClickTargetGame {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: ClickTarget::new(ClickTargetConfig::default()),
            rng: ctx.props().rng(),
            expiry: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Start => {
                let spawn = self.game.start(&mut self.rng);
                self.arm(ctx, spawn);
                true
            }
            Msg::Stop => {
                self.expiry = None;
                self.game.stop();
                true
            }
            Msg::Click(cell) => match self.game.click(cell, &mut self.rng).accepted() {
                Some(HitOutcome::Hit(spawn)) => {
                    self.arm(ctx, spawn);
                    true
                }
                Some(HitOutcome::Completed) => {
                    self.expiry = None;
                    ctx.props().on_win.emit(());
                    true
                }
                Some(HitOutcome::Miss) | None => false,
            },
            Msg::Expired(token) => match self.game.expire(token, &mut self.rng).accepted() {
                Some(spawn) => {
                    self.arm(ctx, spawn);
                    true
                }
                None => {
                    self.expiry = None;
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = self.game.config();
        let state = self.game.state();
        let target = self.game.target();

        let cells = (0..config.grid_cells).map(|cell| {
            let onclick = ctx.link().callback(move |_| Msg::Click(cell));
            let class = classes!("cell", (target == Some(cell)).then_some("target"));
            html! { <button {class} {onclick} disabled={!matches!(state, ClickTargetState::Active)}/> }
        });

        let (label, action) = match state {
            ClickTargetState::Idle if self.game.hits() == 0 => ("Start", Msg::Start),
            ClickTargetState::Idle | ClickTargetState::Completed => ("Play again", Msg::Start),
            ClickTargetState::Active => ("Stop", Msg::Stop),
        };
        let onclick = ctx.link().callback(move |_| action);

        html! {
            <div class="click-target">
                <div class="grid">{ for cells }</div>
                <p class="status">
                    {format!("Hits: {}/{}", self.game.hits(), config.hits_to_win)}
                    if self.game.expired() > 0 {
                        <small>{format!(" ({} got away)", self.game.expired())}</small>
                    }
                </p>
                <button {onclick}>{label}</button>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.expiry = None;
        self.game.stop();
    }
}
