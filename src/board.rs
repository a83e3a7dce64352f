//! Game board: occupancy grid, fleet, placement validation and random
//! fleet placement.

use core::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::common::BoardError;
use crate::config::{GameConfig, PLACEMENT_ATTEMPTS};
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, Ship, ShipId, ShipType};

/// Decide whether a ship of `length` fits at `origin` with `orientation`:
/// every cell of the run is on the board and unoccupied.
///
/// # Panics
///
/// Panics if `length` is zero.
pub fn validate_placement(
    board: &Board,
    length: usize,
    origin: Coordinate,
    orientation: Orientation,
) -> bool {
    assert!(length > 0, "ship length must be at least 1");
    match orientation.run(origin, length, board.grid_size) {
        Some(cells) => cells.iter().all(|&c| board.cell(c).is_none()),
        None => false,
    }
}

/// Build a board for `config` with every ship placed at random.
///
/// Fails with [`BoardError::UnableToPlaceShip`] if any ship cannot be placed
/// within [`PLACEMENT_ATTEMPTS`] draws; no partially populated board is
/// returned.
pub fn place_fleet<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<Board, BoardError> {
    let mut board = Board::from_config(config);
    board.place_remaining_randomly(rng)?;
    Ok(board)
}

/// A square board owning its fleet.
///
/// Ship ids index into the configured roster; `ships[i]` is `None` until
/// ship `i` is placed.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid_size: usize,
    cells: Vec<Option<ShipId>>,
    roster: Vec<ShipType>,
    ships: Vec<Option<Ship>>,
}

impl Board {
    /// Create an empty board for the given roster (no ships placed).
    ///
    /// `grid_size` is expected to have passed [`GameConfig::validate`].
    pub fn new(grid_size: usize, roster: Vec<ShipType>) -> Self {
        let ships = vec![None; roster.len()];
        Board {
            grid_size,
            cells: vec![None; grid_size.saturating_mul(grid_size)],
            roster,
            ships,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.grid_size, config.ship_types())
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Configured ship types in fleet order.
    pub fn roster(&self) -> &[ShipType] {
        &self.roster
    }

    /// Occupant of an in-bounds cell. Out-of-bounds cells read as empty.
    pub fn cell(&self, coord: Coordinate) -> Option<ShipId> {
        if !coord.in_bounds(self.grid_size) {
            return None;
        }
        self.cells[coord.index(self.grid_size)]
    }

    /// The ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.cell(coord).and_then(|id| self.ship(id))
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Placed ships in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    /// Ids of configured ships not yet placed.
    pub fn unplaced(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.ships
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| ShipId(i))
    }

    pub fn is_fleet_complete(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    /// Returns `true` when the fleet is complete and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.is_fleet_complete() && self.ships().all(Ship::is_sunk)
    }

    /// Placed ships still afloat.
    pub fn remaining_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships().filter(|s| !s.is_sunk())
    }

    /// Place ship `id` at `origin` with `orientation`. On error nothing changes.
    pub fn place(
        &mut self,
        id: ShipId,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship_type = self
            .roster
            .get(id.0)
            .cloned()
            .ok_or(BoardError::UnknownShip(id))?;
        if self.ships[id.0].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = Ship::new(id, ship_type, origin, orientation, self.grid_size)?;
        if !validate_placement(self, ship.length(), origin, orientation) {
            return Err(BoardError::ShipOverlaps);
        }
        for &c in ship.cells() {
            self.cells[c.index(self.grid_size)] = Some(id);
        }
        self.ships[id.0] = Some(ship);
        Ok(())
    }

    /// Returns a random non-overlapping origin and orientation for ship `id`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        id: ShipId,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        let length = self
            .roster
            .get(id.0)
            .map(ShipType::length)
            .ok_or(BoardError::UnknownShip(id))?;
        if length > 0 && length <= self.grid_size {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let orient = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (max_r, max_c) = match orient {
                    Orientation::Horizontal => (self.grid_size - 1, self.grid_size - length),
                    Orientation::Vertical => (self.grid_size - length, self.grid_size - 1),
                };
                let origin = Coordinate::new(
                    rng.random_range(0..=max_r),
                    rng.random_range(0..=max_c),
                );
                if validate_placement(self, length, origin, orient) {
                    return Ok((origin, orient));
                }
            }
        }
        warn!(
            "unable to place {} (ship {}, length {}) after {} attempts",
            self.roster[id.0].name(),
            id,
            length,
            PLACEMENT_ATTEMPTS
        );
        Err(BoardError::UnableToPlaceShip { ship: id })
    }

    /// Randomly place every ship not yet on the board, in fleet order.
    ///
    /// Ships placed before a failing ship stay on the board.
    pub fn place_remaining_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let pending: Vec<ShipId> = self.unplaced().collect();
        for id in pending {
            let (origin, orient) = self.random_placement(rng, id)?;
            self.place(id, origin, orient)?;
            debug!("placed ship {} at {} {:?}", id, origin, orient);
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ grid_size: {}, ships: {:?} }}",
            self.grid_size, self.ships
        )?;
        for row in 0..self.grid_size {
            for col in 0..self.grid_size {
                match self.cells[row * self.grid_size + col] {
                    Some(id) => write!(f, "{}", id.0 % 10)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
