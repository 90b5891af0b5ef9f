use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Above this density rejection sampling spends most draws on cells that already hold a mine.
const DENSITY_WARNING: f32 = 0.35;

/// Uniform random placement: draw cells with replacement and discard draws that land on a mine until the requested
/// count is reached. No cell is kept safe for the first reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler<R> {
    rng: R,
}

impl<R: Rng> RejectionSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RejectionSampler<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LayoutGenerator for RejectionSampler<R> {
    fn generate(mut self, config: GameConfig) -> MineLayout {
        place_mines(config, &mut self.rng)
    }
}

/// Places exactly `config.mines` mines. `config` must leave at least one safe cell, which [`GameConfig::new`]
/// guarantees.
pub fn place_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> MineLayout {
    let (rows, cols) = config.size;
    let mines = config.mines.min(config.total_cells().saturating_sub(1));
    if mines != config.mines {
        log::warn!(
            "Board cannot hold {} mines, placing {} instead",
            config.mines,
            mines
        );
    }
    if config.density() > DENSITY_WARNING {
        log::warn!(
            "High mine density {:.0}%, placement will retry often",
            config.density() * 100.0
        );
    }

    let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut mines_placed = 0;
    let mut rejected = 0u32;

    while mines_placed < mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        let cell = &mut mine_mask[coords.to_nd_index()];
        if *cell {
            rejected += 1;
            continue;
        }
        *cell = true;
        mines_placed += 1;
    }

    log::debug!(
        "Placed {} mines on a {}x{} board ({} draws rejected)",
        mines_placed,
        cols,
        rows,
        rejected
    );
    MineLayout::from_mine_mask(mine_mask)
}
