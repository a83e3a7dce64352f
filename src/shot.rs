//! Shot outcomes, per-board shot history and shot resolution.

use std::collections::HashMap;

use log::warn;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::MAX_GRID_SIZE;
use crate::coordinate::Coordinate;
use crate::ship::ShipId;

/// Result of firing at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Coordinate was fired at before; nothing changed.
    AlreadyFired,
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank the given ship.
    HitAndSunk(ShipId),
    /// Shot sank the given ship and it was the last one afloat.
    FleetDestroyed(ShipId),
}

impl ShotOutcome {
    /// `true` for any outcome that struck a ship.
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            ShotOutcome::Hit | ShotOutcome::HitAndSunk(_) | ShotOutcome::FleetDestroyed(_)
        )
    }

    /// The ship sunk by this shot, if any.
    pub fn sunk_ship(&self) -> Option<ShipId> {
        match self {
            ShotOutcome::HitAndSunk(id) | ShotOutcome::FleetDestroyed(id) => Some(*id),
            _ => None,
        }
    }

    /// Mark recorded in the shot history, `None` for `AlreadyFired`.
    pub fn mark(&self) -> Option<ShotMark> {
        match self {
            ShotOutcome::AlreadyFired => None,
            ShotOutcome::Miss => Some(ShotMark::Miss),
            ShotOutcome::Hit => Some(ShotMark::Hit),
            ShotOutcome::HitAndSunk(_) | ShotOutcome::FleetDestroyed(_) => {
                Some(ShotMark::HitAndSunk)
            }
        }
    }
}

/// Outcome tag stored per fired coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotMark {
    Miss,
    Hit,
    HitAndSunk,
}

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub coordinate: Coordinate,
    pub mark: ShotMark,
}

/// Coordinates already fired at one board, with constant-time membership
/// and an ordered log for replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotHistory {
    grid_size: usize,
    marks: HashMap<Coordinate, ShotMark>,
    log: Vec<ShotRecord>,
}

impl ShotHistory {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            marks: HashMap::with_capacity(grid_size.min(MAX_GRID_SIZE).pow(2)),
            log: Vec::new(),
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.marks.contains_key(&coord)
    }

    pub fn mark(&self, coord: Coordinate) -> Option<ShotMark> {
        self.marks.get(&coord).copied()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// `true` once every cell of the board has been fired at.
    pub fn is_full(&self) -> bool {
        self.marks.len() >= self.grid_size.saturating_mul(self.grid_size)
    }

    /// Shots in the order they were fired.
    pub fn records(&self) -> &[ShotRecord] {
        &self.log
    }

    pub fn hits(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.log
            .iter()
            .filter(|r| r.mark != ShotMark::Miss)
            .map(|r| r.coordinate)
    }

    pub fn misses(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.log
            .iter()
            .filter(|r| r.mark == ShotMark::Miss)
            .map(|r| r.coordinate)
    }

    /// Coordinates not yet fired at, in row-major order.
    pub fn untried(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let n = self.grid_size;
        (0..n.saturating_mul(n))
            .map(move |i| Coordinate::new(i / n, i % n))
            .filter(move |c| !self.contains(*c))
    }

    /// Returns `false` if `coord` was already recorded.
    fn record(&mut self, coord: Coordinate, mark: ShotMark) -> bool {
        if self.marks.contains_key(&coord) {
            return false;
        }
        self.marks.insert(coord, mark);
        self.log.push(ShotRecord {
            coordinate: coord,
            mark,
        });
        true
    }
}

/// Apply a shot at `coord` to `board`, recording it in `history`.
///
/// Repeated shots return [`ShotOutcome::AlreadyFired`] and touch nothing.
/// Only the history, and the hit count of the ship struck, are mutated.
pub fn resolve(
    board: &mut Board,
    history: &mut ShotHistory,
    coord: Coordinate,
) -> Result<ShotOutcome, BoardError> {
    if !coord.in_bounds(board.grid_size()) {
        return Err(BoardError::OutOfBounds(coord));
    }
    if history.contains(coord) {
        return Ok(ShotOutcome::AlreadyFired);
    }

    let outcome = match board.cell(coord) {
        None => ShotOutcome::Miss,
        Some(id) => {
            let sunk = match board.ship_mut(id) {
                Some(ship) => {
                    if ship.register_hit() {
                        ship.is_sunk()
                    } else {
                        warn!("ship {} at {} was hit after sinking; hit ignored", id, coord);
                        false
                    }
                }
                None => {
                    warn!("cell {} names ship {} which is not in the fleet", coord, id);
                    false
                }
            };
            if !sunk {
                ShotOutcome::Hit
            } else if board.all_sunk() {
                ShotOutcome::FleetDestroyed(id)
            } else {
                ShotOutcome::HitAndSunk(id)
            }
        }
    };

    if let Some(mark) = outcome.mark() {
        history.record(coord, mark);
    }
    Ok(outcome)
}
