use crate::config::EventConfig;
use crate::games::*;
use crate::landing::LandingView;
use crate::roster::{TeamsView, VolunteersView, load_roster};
use crate::theme::Theme;
use clap::ValueEnum;
use codegate_core::{GameId, Gauntlet, RecordOutcome, Roster, SecretSlot};
use gloo::events::EventListener;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Page {
    #[default]
    Landing,
    Teams,
    Volunteers,
    Gauntlet,
}

impl Page {
    const ALL: [Page; 4] = [Self::Landing, Self::Teams, Self::Volunteers, Self::Gauntlet];

    /// Page named by the first segment of a location hash like `#teams&-v`.
    pub(crate) fn from_hash(hash: &str) -> Self {
        hash.trim_start_matches('#')
            .split('&')
            .next()
            .and_then(|segment| Self::from_str(segment, true).ok())
            .unwrap_or_default()
    }

    const fn anchor(self) -> &'static str {
        use Page::*;
        match self {
            Landing => "#",
            Teams => "#teams",
            Volunteers => "#volunteers",
            Gauntlet => "#gauntlet",
        }
    }

    const fn label(self) -> &'static str {
        use Page::*;
        match self {
            Landing => "Home",
            Teams => "Teams",
            Volunteers => "Volunteers",
            Gauntlet => "Gauntlet",
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub page: Page,
    pub seed: u64,
    #[prop_or_default]
    pub api_base: Option<AttrValue>,
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum Msg {
    Navigate(Page),
    Won(GameId),
    CycleTheme,
}

pub(crate) struct App {
    page: Page,
    gauntlet: Gauntlet,
    roster: Rc<Roster>,
    event: Rc<EventConfig>,
    theme: Option<Theme>,
    _hash_listener: EventListener,
}

impl App {
    fn api_base(&self, ctx: &Context<Self>) -> AttrValue {
        ctx.props()
            .api_base
            .clone()
            .unwrap_or_else(|| AttrValue::from(self.event.creature_api.clone()))
    }

    fn view_nav(&self, ctx: &Context<Self>) -> Html {
        html! {
            <header>
                <nav>
                    {
                        for Page::ALL.into_iter().map(|page| html! {
                            <a href={page.anchor()} class={classes!((page == self.page).then_some("active"))}>
                                {page.label()}
                            </a>
                        })
                    }
                </nav>
                <button class="theme" onclick={ctx.link().callback(|_| Msg::CycleTheme)}>
                    {format!("Theme: {}", Theme::label(self.theme))}
                </button>
            </header>
        }
    }

    fn view_gauntlet(&self, ctx: &Context<Self>) -> Html {
        let seed = ctx.props().seed;
        let on_win = |id: GameId| ctx.link().callback(move |()| Msg::Won(id));
        let game_seed = |id: GameId| seed.wrapping_add(id.index() as u64);

        let board = |id: GameId| {
            let on_win = on_win(id);
            let seed = game_seed(id);
            let game = match id {
                GameId::SlidingPuzzle => html! { <PuzzleGame {seed} {on_win}/> },
                GameId::ClickTarget => html! { <ClickTargetGame {seed} {on_win}/> },
                GameId::PatternRepeater => html! { <PatternGame {seed} {on_win}/> },
                GameId::QuickMath => html! { <QuickMathGame {seed} {on_win}/> },
                GameId::WordScramble => html! { <WordScrambleGame {seed} {on_win}/> },
            };
            let solved = self.gauntlet.slot(id).is_revealed();
            html! {
                <article class={classes!("game", id.slug(), solved.then_some("solved"))} key={id.slug()}>
                    <h3>{id.title()}</h3>
                    {game}
                </article>
            }
        };

        html! {
            <section class="gauntlet">
                <div class="games">{ for GameId::ALL.into_iter().map(board) }</div>
                {self.view_progress()}
            </section>
        }
    }

    fn view_progress(&self) -> Html {
        let slots = self.gauntlet.progress().map(|(id, slot)| {
            let (class, code) = match slot {
                SecretSlot::Revealed(code) => ("revealed", code),
                SecretSlot::Locked => ("locked", "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}"),
            };
            html! {
                <li class={class} key={id.slug()}>
                    <span class="game">{id.title()}</span>
                    <code>{code}</code>
                </li>
            }
        });

        html! {
            <aside class="progress">
                <h3>{format!("Codes {}/{}", self.gauntlet.revealed_count(), GameId::COUNT)}</h3>
                <ol>{ for slots }</ol>
                if self.gauntlet.is_complete() {
                    <div class="complete">
                        <h4>{"Gauntlet cleared!"}</h4>
                        <p>{"Show these five codes at the registration desk to claim your badge."}</p>
                    </div>
                }
            </aside>
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let listener = EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
            let hash = gloo::utils::window().location().hash().unwrap_or_default();
            link.send_message(Msg::Navigate(Page::from_hash(&hash)));
        });

        Self {
            page: ctx.props().page,
            gauntlet: Gauntlet::default(),
            roster: Rc::new(load_roster()),
            event: Rc::new(EventConfig::load()),
            theme: Theme::init(),
            _hash_listener: listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                log::debug!("navigate to {:?}", page);
                std::mem::replace(&mut self.page, page) != page
            }
            Msg::Won(id) => {
                let outcome = self.gauntlet.record_win(id);
                if let RecordOutcome::Revealed(code) = outcome {
                    log::info!("{} cleared: {}", id.title(), code);
                    if self.gauntlet.is_complete() {
                        log::info!("gauntlet complete");
                    }
                }
                outcome.has_update()
            }
            Msg::CycleTheme => {
                self.theme = Theme::cycle(self.theme);
                Theme::apply(self.theme);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match self.page {
            Page::Landing => html! { <LandingView event={self.event.clone()}/> },
            Page::Teams => html! { <TeamsView roster={self.roster.clone()}/> },
            Page::Volunteers => html! {
                <VolunteersView
                    roster={self.roster.clone()}
                    api_base={self.api_base(ctx)}
                    timeout_ms={self.event.fetch_timeout_ms}
                />
            },
            Page::Gauntlet => self.view_gauntlet(ctx),
        };

        html! {
            <>
                {self.view_nav(ctx)}
                <main>{content}</main>
                <footer>{format!("{} \u{00b7} {}", self.event.name, self.event.venue)}</footer>
            </>
        }
    }
}
