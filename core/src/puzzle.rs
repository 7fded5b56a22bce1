use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tiles per side of the image grid.
pub const GRID_SIDE: u8 = 3;

pub const TILE_COUNT: usize = (GRID_SIDE as usize) * (GRID_SIDE as usize);

/// Stable tile identity in `1..=9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    pub fn new(raw: u8) -> Result<Self> {
        if (1..=TILE_COUNT as u8).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(GameError::InvalidTile)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// One ninth of the puzzle image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    correct_position: u8,
    current_position: u8,
}

impl Tile {
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Slot whose image region this tile shows.
    pub const fn correct_position(&self) -> u8 {
        self.correct_position
    }

    pub const fn current_position(&self) -> u8 {
        self.current_position
    }

    pub const fn is_locked(&self) -> bool {
        self.current_position == self.correct_position
    }

    /// `(column, row)` of the image slice to draw on this tile.
    pub const fn source_cell(&self) -> (u8, u8) {
        position_to_cell(self.correct_position)
    }

    /// `(column, row)` the tile currently occupies.
    pub const fn current_cell(&self) -> (u8, u8) {
        position_to_cell(self.current_position)
    }
}

pub const fn position_to_cell(position: u8) -> (u8, u8) {
    (position % GRID_SIDE, position / GRID_SIDE)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleState {
    /// Freshly reset, waiting for the re-render delay before taking input.
    Loading,
    Scrambled,
    Solved,
}

impl PuzzleState {
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Scrambled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub reset_delay_ms: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 300,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Deselected,
    Swapped { locked: u8 },
    Solved,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// Free-swap picture puzzle on a 3×3 grid.
///
/// Any two tiles may trade places, so every scramble is solvable. Picking the
/// same tile twice drops the selection; picking a second tile swaps the pair
/// and clears the selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidingPuzzle {
    config: PuzzleConfig,
    tiles: [Tile; TILE_COUNT],
    selected: Option<TileId>,
    state: PuzzleState,
    moves: u32,
    loading: TimerSlot,
    latch: WinLatch,
}

impl SlidingPuzzle {
    pub fn new<R: Rng + ?Sized>(config: PuzzleConfig, rng: &mut R) -> Self {
        Self::with_positions(config, derangement(rng))
    }

    /// Builds a puzzle where tile `i + 1` sits at `positions[i]`. An already
    /// solved layout is refused.
    pub fn from_positions(config: PuzzleConfig, positions: [u8; TILE_COUNT]) -> Result<Self> {
        let mut seen = [false; TILE_COUNT];
        for &position in &positions {
            let slot = seen
                .get_mut(usize::from(position))
                .ok_or(GameError::InvalidTile)?;
            if core::mem::replace(slot, true) {
                return Err(GameError::InvalidTile);
            }
        }
        if positions.iter().enumerate().all(|(i, &position)| usize::from(position) == i) {
            return Err(GameError::AlreadyEnded);
        }
        Ok(Self::with_positions(config, positions))
    }

    fn with_positions(config: PuzzleConfig, positions: [u8; TILE_COUNT]) -> Self {
        Self {
            config,
            tiles: build_tiles(positions),
            selected: None,
            state: PuzzleState::Scrambled,
            moves: 0,
            loading: TimerSlot::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.state, PuzzleState::Solved)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// The tile occupying `position`, if the position is on the grid.
    pub fn tile_at(&self, position: u8) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|tile| tile.current_position == position)
    }

    pub fn locked_count(&self) -> u8 {
        self.tiles.iter().filter(|tile| tile.is_locked()).count() as u8
    }

    pub fn select(&mut self, id: TileId) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        self.check_playable()?;

        let outcome = match self.selected {
            None => {
                self.selected = Some(id);
                Selected
            }
            Some(first) if first == id => {
                self.selected = None;
                Deselected
            }
            Some(first) => {
                self.selected = None;
                self.swap(first, id);
                self.moves = self.moves.saturating_add(1);
                if self.settle() {
                    log::debug!("puzzle solved in {} moves", self.moves);
                    Solved
                } else {
                    Swapped {
                        locked: self.locked_count(),
                    }
                }
            }
        };

        log::trace!("select {:?} -> {:?}", id, outcome);
        Ok(outcome)
    }

    /// Reshuffles into a fresh derangement and waits `reset_delay_ms` before
    /// accepting input again.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Cue {
        self.tiles = build_tiles(derangement(rng));
        self.selected = None;
        self.moves = 0;
        self.latch.rearm();
        self.state = PuzzleState::Loading;
        log::debug!("puzzle reset");
        self.loading.cue(self.config.reset_delay_ms)
    }

    pub fn finish_loading(&mut self, token: TimerToken) -> Result<()> {
        self.loading.fire(token)?;
        if matches!(self.state, PuzzleState::Loading) {
            self.state = PuzzleState::Scrambled;
        }
        Ok(())
    }

    /// Cancels the pending reset delay, leaving the board as it is.
    pub fn stop(&mut self) {
        if self.loading.cancel() && matches!(self.state, PuzzleState::Loading) {
            self.state = PuzzleState::Scrambled;
        }
    }

    /// Re-evaluates the solved condition; `true` only on the transition into
    /// [`PuzzleState::Solved`].
    pub fn settle(&mut self) -> bool {
        debug_assert!(self.is_permutation());

        if self.state.is_playable()
            && self.locked_count() as usize == TILE_COUNT
            && self.latch.fire()
        {
            self.state = PuzzleState::Solved;
            true
        } else {
            false
        }
    }

    fn swap(&mut self, a: TileId, b: TileId) {
        let pos_a = self.tiles[a.index()].current_position;
        let pos_b = self.tiles[b.index()].current_position;
        self.tiles[a.index()].current_position = pos_b;
        self.tiles[b.index()].current_position = pos_a;
    }

    fn is_permutation(&self) -> bool {
        let mut seen = [false; TILE_COUNT];
        self.tiles.iter().all(|tile| {
            seen.get_mut(usize::from(tile.current_position))
                .is_some_and(|slot| !core::mem::replace(slot, true))
        })
    }

    fn check_playable(&self) -> Result<()> {
        match self.state {
            PuzzleState::Scrambled => Ok(()),
            PuzzleState::Loading => Err(GameError::NotAcceptingInput),
            PuzzleState::Solved => Err(GameError::AlreadyEnded),
        }
    }
}

fn build_tiles(positions: [u8; TILE_COUNT]) -> [Tile; TILE_COUNT] {
    core::array::from_fn(|i| Tile {
        id: TileId(i as u8 + 1),
        correct_position: i as u8,
        current_position: positions[i],
    })
}
