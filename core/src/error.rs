use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Dimensions must be positive and mine count strictly between 0 and the cell total")]
    InvalidConfig,
    #[error("Coordinates outside the board")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
