use alloc::collections::VecDeque;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game: the fixed mine layout plus everything the player has done to it.
///
/// Once the outcome is [`Outcome::Won`] or [`Outcome::Lost`] every mutation is a no-op.
/// A deserialized board gets its mine layout validated; the play state alongside it is taken as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flags_left: CellCount,
    correct_flags: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let flags_left = mine_layout.mine_count();
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flags_left,
            correct_flags: 0,
            outcome: Default::default(),
            triggered_mine: None,
        }
    }

    /// Validates the configuration and places `mines` mines uniformly at random.
    pub fn random<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        mines: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Ok(Self::new(place_mines(config, rng)))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.flags_left
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// The mine layout, only available once the game is over.
    pub fn revealed_layout(&self) -> Option<&MineLayout> {
        self.is_finished().then_some(&self.mine_layout)
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn neighbor_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.mine_layout.adjacent_mine_count(coords))
    }

    /// Flags a hidden cell or removes an existing flag. Flags are limited to the number of mines.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(FlagOutcome::Rejected);
        }

        let has_mine = self.mine_layout[coords];
        let outcome = match self.cells[coords.to_nd_index()] {
            Hidden if self.flags_left == 0 => return Ok(FlagOutcome::Rejected),
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flags_left -= 1;
                if has_mine {
                    self.correct_flags += 1;
                }
                FlagOutcome::Flagged
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flags_left += 1;
                if has_mine {
                    self.correct_flags -= 1;
                }
                FlagOutcome::Unflagged
            }
            Revealed(_) | RevealedMine => return Ok(FlagOutcome::Rejected),
        };
        log::debug!("{:?} at {:?}, {} flags left", outcome, coords, self.flags_left);

        self.check_won();
        Ok(outcome)
    }

    /// Reveals a hidden cell. A zero cell opens its whole connected zero region and the numbered cells bordering it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if self.is_finished() || self.cells[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        if self.mine_layout[coords] {
            self.cells[coords.to_nd_index()] = CellState::RevealedMine;
            self.triggered_mine = Some(coords);
            self.end_game(Outcome::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(coords);

        Ok(if self.check_won() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Breadth-first flood fill guarded by cell state: only hidden cells are opened, so each cell is opened at most
    /// once and flags are never crossed. Zero cells have no mined neighbours, so this never opens a mine.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.cells[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(visit_coords);
            self.cells[visit_coords.to_nd_index()] = CellState::Revealed(adjacent_mines);
            self.revealed_count += 1;
            log::trace!(
                "Opened cell at {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| cells[pos.to_nd_index()] == CellState::Hidden),
                );
            }
        }

        log::debug!(
            "Reveal at {:?} done, {}/{} safe cells open",
            start,
            self.revealed_count,
            self.mine_layout.safe_cell_count()
        );
    }

    /// Either every safe cell is open, or the flags sit on exactly the mines.
    fn check_won(&mut self) -> bool {
        let mines = self.mine_layout.mine_count();
        let all_safe_revealed = self.revealed_count == self.mine_layout.safe_cell_count();
        let flags_placed = mines - self.flags_left;
        let flags_match_mines = flags_placed == mines && self.correct_flags == mines;

        if all_safe_revealed || flags_match_mines {
            self.end_game(Outcome::Won);
            true
        } else {
            false
        }
    }

    fn end_game(&mut self, outcome: Outcome) {
        if self.outcome.is_finished() {
            return;
        }

        log::debug!("Game over: {:?}", outcome);
        self.outcome = outcome;
    }
}
