use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid tile id")]
    InvalidTile,
    #[error("Invalid grid cell")]
    InvalidCell,
    #[error("Invalid button index")]
    InvalidButton,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is not accepting input right now")]
    NotAcceptingInput,
    #[error("Timer was cancelled or superseded")]
    StaleTimer,
    #[error("Hint was already used")]
    HintAlreadyUsed,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Malformed roster data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Duplicate team id {0}")]
    DuplicateTeam(u32),
    #[error("Duplicate volunteer id {0}")]
    DuplicateVolunteer(u32),
}
