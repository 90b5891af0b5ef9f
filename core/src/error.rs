use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines: {mines} requested, but a board of {cells} cells needs at least one safe cell")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Board shape does not fit the coordinate range")]
    InvalidBoardShape,
    #[error("Mine count {declared} does not match the {actual} mines in the layout")]
    MineCountMismatch {
        declared: CellCount,
        actual: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
