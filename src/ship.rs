//! Ship definitions: identity, shape and hit tracking.

use core::fmt;

use crate::common::BoardError;
use crate::coordinate::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The `i`th cell of a run starting at `origin`, unchecked against bounds.
    fn step(self, origin: Coordinate, i: usize) -> Option<Coordinate> {
        match self {
            Orientation::Horizontal => origin
                .col
                .checked_add(i)
                .map(|c| Coordinate::new(origin.row, c)),
            Orientation::Vertical => origin
                .row
                .checked_add(i)
                .map(|r| Coordinate::new(r, origin.col)),
        }
    }

    /// Cells covered by a run of `length` from `origin`, or `None` if any of
    /// them falls outside a board of `grid_size`.
    pub fn run(
        self,
        origin: Coordinate,
        length: usize,
        grid_size: usize,
    ) -> Option<Vec<Coordinate>> {
        (0..length)
            .map(|i| self.step(origin, i).filter(|c| c.in_bounds(grid_size)))
            .collect()
    }
}

/// Stable identity of a ship within its fleet: its position in the
/// configured fleet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipType {
    name: String,
    length: usize,
}

impl ShipType {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    ship_type: ShipType,
    orientation: Orientation,
    origin: Coordinate,
    cells: Vec<Coordinate>,
    hit_count: usize,
}

impl Ship {
    /// Place a ship at `origin` with `orientation` on a board of `grid_size`.
    pub fn new(
        id: ShipId,
        ship_type: ShipType,
        origin: Coordinate,
        orientation: Orientation,
        grid_size: usize,
    ) -> Result<Self, BoardError> {
        let cells = orientation
            .run(origin, ship_type.length(), grid_size)
            .ok_or(BoardError::ShipOutOfBounds)?;
        Ok(Ship {
            id,
            ship_type,
            orientation,
            origin,
            cells,
            hit_count: 0,
        })
    }

    /// Count one hit. Returns `false` without counting if the ship is
    /// already sunk.
    pub fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hit_count += 1;
        true
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hit_count == self.ship_type.length()
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn ship_type(&self) -> &ShipType {
        &self.ship_type
    }

    pub fn name(&self) -> &str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// First cell of the ship.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Occupied cells in order from the origin.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }
}
