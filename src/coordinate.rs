//! Value-typed board coordinates.

use core::fmt;

/// A cell on the board addressed by (`row`, `col`).
///
/// Equality, ordering and hashing are structural, so coordinates can key
/// shot-history lookups directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate. Bounds are checked against a board, not here.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the coordinate lies on an `grid_size`×`grid_size` board.
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// Row-major index on a board of `grid_size`.
    pub fn index(&self, grid_size: usize) -> usize {
        self.row * grid_size + self.col
    }

    /// Coordinate displaced by (`d_row`, `d_col`), or `None` if it would
    /// leave the board.
    pub fn offset(&self, d_row: isize, d_col: isize, grid_size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Self::new(row, col);
        next.in_bounds(grid_size).then_some(next)
    }

    /// The in-bounds axis neighbours in fixed order: up, down, left, right.
    pub fn neighbours(self, grid_size: usize) -> impl Iterator<Item = Coordinate> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc, grid_size))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
