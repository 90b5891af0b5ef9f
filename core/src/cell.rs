use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Safe cell showing its neighbour mine count (0-8).
    Revealed(u8),
    /// The mine that ended the game.
    RevealedMine,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
