#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Board dimensions and mine count, validated so that placement always terminates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard);
        }
        let cells = mult(width, height);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(Self::new_unchecked((height, width), mines))
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Fraction of the board covered by mines.
    pub fn density(&self) -> f32 {
        f32::from(self.mines) / f32::from(self.total_cells())
    }
}

/// Where the mines are. Fixed once placed.
///
/// Deserialization goes through the same checks as [`MineLayout::from_mine_coords`], so a stored layout can never
/// be full of mines or carry a count that disagrees with its mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        let (rows, cols) = raw.mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = Self::from_mine_mask(raw.mine_mask);
        if layout.mine_count != raw.mine_count {
            return Err(GameError::MineCountMismatch {
                declared: raw.mine_count,
                actual: layout.mine_count,
            });
        }
        if layout.mine_count >= layout.total_cells() {
            return Err(GameError::TooManyMines {
                mines: layout.mine_count,
                cells: layout.total_cells(),
            });
        }
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // the mask is at most `Coord::MAX` squared, which fits a `CellCount`
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        if layout.mine_count >= layout.total_cells() {
            return Err(GameError::TooManyMines {
                mines: layout.mine_count,
                cells: layout.total_cells(),
            });
        }
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines in the 3x3 neighbourhood of `coords`, not counting `coords` itself.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Rejected,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn config_rejects_full_and_empty_boards() {
        assert_eq!(
            GameConfig::new(3, 3, 9),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
        assert_eq!(GameConfig::new(0, 3, 0), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new(3, 0, 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn config_stores_height_first() {
        let config = GameConfig::new(5, 2, 3).unwrap();

        assert_eq!(config.size, (2, 5));
        assert_eq!(config.width(), 5);
        assert_eq!(config.height(), 2);
        assert_eq!(config.total_cells(), 10);
    }

    #[test]
    fn layout_counts_mines_and_ignores_duplicates() {
        let layout = MineLayout::from_mine_coords((3, 4), &[(0, 0), (2, 3), (0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 10);
        assert!(layout.contains_mine((2, 3)));
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.game_config(), GameConfig::new_unchecked((3, 4), 2));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn layout_requires_a_safe_cell() {
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines { mines: 2, cells: 2 })
        );
    }

    #[test]
    fn adjacent_mine_count_clips_to_bounds() {
        let all_but_center = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        let layout = MineLayout::from_mine_coords((3, 3), &all_but_center).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 8);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 4);
    }

    #[test]
    fn iter_mines_lists_every_mine() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(1, 2), (0, 1)]).unwrap();

        let mut mines = alloc::vec::Vec::from_iter(layout.iter_mines());
        mines.sort();
        assert_eq!(mines, [(0, 1), (1, 2)]);
    }

    #[test]
    fn layout_round_trips_through_serde() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 0)]).unwrap();

        let json = serde_json::to_string(&layout).unwrap();
        let restored: MineLayout = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, layout);
    }

    #[test]
    fn deserialize_rejects_full_layout() {
        let full = MineLayout::from_mine_mask(Array2::from_elem([2, 2], true));
        let json = serde_json::to_string(&full).unwrap();

        let err = serde_json::from_str::<MineLayout>(&json).unwrap_err();

        assert!(err.to_string().starts_with("Too many mines"));
    }

    #[test]
    fn deserialize_rejects_count_mismatch() {
        let mut layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        layout.mine_count = 4;
        let json = serde_json::to_string(&layout).unwrap();

        let err = serde_json::from_str::<MineLayout>(&json).unwrap_err();

        assert!(err.to_string().starts_with("Mine count 4 does not match the 1 mines"));
    }
}
