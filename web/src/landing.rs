use crate::config::EventConfig;
use crate::countdown::{Countdown, utc_now};
use gloo::timers::callback::Interval;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LandingProps {
    pub event: Rc<EventConfig>,
}

pub(crate) enum Msg {
    Tick,
}

pub(crate) struct LandingView {
    countdown: Option<Countdown>,
    _ticker: Interval,
}

impl LandingView {
    fn countdown(event: &EventConfig) -> Option<Countdown> {
        event
            .starts_at
            .as_ref()
            .map(|start| Countdown::until(utc_now(), start))
    }
}

impl Component for LandingView {
    type Message = Msg;
    type Properties = LandingProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        Self {
            countdown: Self::countdown(&ctx.props().event),
            _ticker: Interval::new(1000, move || link.send_message(Msg::Tick)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Tick = msg;
        let countdown = Self::countdown(&ctx.props().event);
        if countdown != self.countdown {
            self.countdown = countdown;
            true
        } else {
            false
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let event = &ctx.props().event;

        html! {
            <section class="landing">
                <h1>{event.name.clone()}</h1>
                <p class="tagline">{event.tagline.clone()}</p>
                <p class="venue">{event.venue.clone()}</p>
                {
                    match self.countdown {
                        Some(countdown) if countdown.is_over() => html! {
                            <p class="countdown live">{"We're live. Happy hacking!"}</p>
                        },
                        Some(countdown) => html! {
                            <ul class="countdown">
                                {
                                    for countdown.units().into_iter().map(|(value, unit)| html! {
                                        <li><strong>{value}</strong><small>{unit}</small></li>
                                    })
                                }
                            </ul>
                        },
                        None => html! {},
                    }
                }
                <nav class="cta">
                    <a href="#teams">{"Meet the teams"}</a>
                    <a href="#volunteers">{"Meet the crew"}</a>
                    <a href="#gauntlet" class="primary">{"Run the gauntlet"}</a>
                </nav>
            </section>
        }
    }
}
