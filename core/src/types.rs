//! Coordinate types and neighbourhood iteration.
//!
//! Positions are `(row, col)` and sizes `(height, width)`, matching the `Array2` axis order so a `Coord2` indexes the
//! board grids directly. Neighbours are the up to 8 cells of the surrounding 3x3 block that fall inside the board.

use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag budgets and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`. Board sizes use the same order: `(height, width)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // boards are built from `Coord` sized dimensions, so this never truncates
        NeighborIter::new(index, (rows as Coord, cols as Coord))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates over the in-bounds cells of the 3x3 neighbourhood around `center`, excluding the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while usize::from(self.index) < DISPLACEMENTS.len() {
            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_count_depends_on_position() {
        let bounds = (4, 5);

        assert_eq!(NeighborIter::new((0, 0), bounds).count(), 3);
        assert_eq!(NeighborIter::new((3, 4), bounds).count(), 3);
        assert_eq!(NeighborIter::new((0, 2), bounds).count(), 5);
        assert_eq!(NeighborIter::new((2, 0), bounds).count(), 5);
        assert_eq!(NeighborIter::new((1, 1), bounds).count(), 8);
    }

    #[test]
    fn neighbors_stay_in_bounds_and_skip_center() {
        let bounds = (3, 3);

        for row in 0..3 {
            for col in 0..3 {
                for (r, c) in NeighborIter::new((row, col), bounds) {
                    assert!(r < 3 && c < 3);
                    assert_ne!((r, c), (row, col));
                    assert!(r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1);
                }
            }
        }
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn mult_widens_to_cell_count() {
        assert_eq!(mult(3, 4), 12);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 255 * 255);
    }
}
