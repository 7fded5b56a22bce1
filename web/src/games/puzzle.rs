use super::schedule;
use crate::utils::*;
use codegate_core::{
    GRID_SIDE, PuzzleConfig, PuzzleState, SelectOutcome, SlidingPuzzle, TILE_COUNT, Tile, TileId,
    TimerToken,
};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PuzzleProps {
    pub seed: u64,
    pub on_win: Callback<()>,
    /// Picture sliced into the 3x3 grid.
    #[prop_or(AttrValue::Static("assets/nebula.svg"))]
    pub image: AttrValue,
}

pub(crate) enum Msg {
    Select(TileId),
    Reset,
    Loaded(TimerToken),
}

pub(crate) struct PuzzleGame {
    puzzle: SlidingPuzzle,
    rng: SmallRng,
    loading: Option<Timeout>,
}

/// Inline style showing the image region of `tile`'s home cell.
fn tile_style(tile: &Tile, image: &str) -> String {
    let (col, row) = tile.source_cell();
    let step = 100 / (GRID_SIDE - 1) as u32;
    format!(
        "background-image: url('{}'); background-position: {}% {}%",
        image,
        u32::from(col) * step,
        u32::from(row) * step,
    )
}

impl Component for PuzzleGame {
    type Message = Msg;
    type Properties = PuzzleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut rng = SmallRng::seed_from_u64(ctx.props().seed);
        Self {
            puzzle: SlidingPuzzle::new(PuzzleConfig::default(), &mut rng),
            rng,
            loading: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Select(id) => match self.puzzle.select(id).accepted() {
                Some(outcome) => {
                    if let SelectOutcome::Solved = outcome {
                        ctx.props().on_win.emit(());
                    }
                    outcome.has_update()
                }
                None => false,
            },
            Msg::Reset => {
                let cue = self.puzzle.reset(&mut self.rng);
                self.loading = Some(schedule(ctx.link(), cue, Msg::Loaded));
                true
            }
            Msg::Loaded(token) => {
                self.loading = None;
                self.puzzle.finish_loading(token).accepted().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let image = ctx.props().image.clone();
        let state = self.puzzle.state();
        let selected = self.puzzle.selected();

        let cells = (0..TILE_COUNT as u8).filter_map(|position| {
            let tile = self.puzzle.tile_at(position)?;
            let id = tile.id();
            let class = classes!(
                "tile",
                tile.is_locked().then_some("locked"),
                (selected == Some(id)).then_some("selected"),
            );
            let onclick = ctx.link().callback(move |_| Msg::Select(id));
            Some(html! {
                <button {class} style={tile_style(tile, &image)} {onclick}
                    aria-label={format!("tile {}", id.get())}/>
            })
        });

        let status = match state {
            PuzzleState::Loading => "Shuffling...".to_string(),
            PuzzleState::Scrambled => format!(
                "{}/{} in place, {} moves",
                self.puzzle.locked_count(),
                TILE_COUNT,
                self.puzzle.moves()
            ),
            PuzzleState::Solved => format!("Solved in {} moves!", self.puzzle.moves()),
        };

        html! {
            <div class={classes!("puzzle", matches!(state, PuzzleState::Loading).then_some("loading"))}>
                <div class="grid">{ for cells }</div>
                <p class="status">{status}</p>
                <button onclick={ctx.link().callback(|_| Msg::Reset)}>{"Reshuffle"}</button>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.loading = None;
        self.puzzle.stop();
    }
}
