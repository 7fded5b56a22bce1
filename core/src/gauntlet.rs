use alloc::collections::BTreeMap;

use crate::*;

/// Secret code revealed by each game, indexed by [`GameId::index`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SecretTable {
    codes: [&'static str; GameId::COUNT],
}

impl SecretTable {
    /// `codes` must follow [`GameId::ALL`] order.
    pub const fn new(codes: [&'static str; GameId::COUNT]) -> Self {
        Self { codes }
    }

    pub const fn code(&self, id: GameId) -> &'static str {
        self.codes[id.index()]
    }
}

pub static SECRET_CODES: SecretTable =
    SecretTable::new(["NEBULA-7", "COMET-42", "PULSAR-19", "QUASAR-3", "ORBIT-88"]);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SecretSlot {
    Locked,
    Revealed(&'static str),
}

impl SecretSlot {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Revealed(&'static str),
    AlreadyRevealed,
}

impl RecordOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

/// Collects the codes of won games for the current page session.
///
/// Codes are never taken back once revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct Gauntlet {
    table: &'static SecretTable,
    revealed: BTreeMap<GameId, &'static str>,
}

impl Default for Gauntlet {
    fn default() -> Self {
        Self::new(&SECRET_CODES)
    }
}

impl Gauntlet {
    pub fn new(table: &'static SecretTable) -> Self {
        Self {
            table,
            revealed: BTreeMap::new(),
        }
    }

    /// Reveals the code of `id`; repeated wins change nothing.
    pub fn record_win(&mut self, id: GameId) -> RecordOutcome {
        if self.revealed.contains_key(&id) {
            log::trace!("{:?} already revealed", id);
            return RecordOutcome::AlreadyRevealed;
        }

        let code = self.table.code(id);
        self.revealed.insert(id, code);
        log::debug!(
            "{:?} revealed ({}/{})",
            id,
            self.revealed.len(),
            GameId::COUNT
        );
        RecordOutcome::Revealed(code)
    }

    pub fn is_complete(&self) -> bool {
        self.revealed.len() == GameId::COUNT
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn slot(&self, id: GameId) -> SecretSlot {
        self.revealed
            .get(&id)
            .map_or(SecretSlot::Locked, |&code| SecretSlot::Revealed(code))
    }

    /// Every game in display order with its reveal state.
    pub fn progress(&self) -> impl Iterator<Item = (GameId, SecretSlot)> + '_ {
        GameId::ALL.into_iter().map(|id| (id, self.slot(id)))
    }
}
