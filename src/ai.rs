// Hunt/target shot selection for the computer opponent.
//
// The opponent only sees its own shot history. It fires at random until it
// hits something, then walks outwards from the confirmed hits until the ship
// sinks or the line runs out of untried cells.

use log::{debug, warn};
use rand::Rng;

use crate::{config::HUNT_ATTEMPTS, coordinate::Coordinate, shot::ShotHistory, shot::ShotOutcome};

/// Targeting mode of the opponent.
///
/// Transitions never edit a previous state's hit list; every change builds a
/// new `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetingState {
    /// No live lead: shoot at random untried cells.
    #[default]
    Hunt,
    /// Following hits on a ship not yet confirmed sunk. Two or more hits
    /// fix the ship's axis.
    Target { confirmed_hits: Vec<Coordinate> },
}

impl TargetingState {
    pub fn is_hunting(&self) -> bool {
        matches!(self, TargetingState::Hunt)
    }

    /// Hits on the ship currently pursued; empty while hunting.
    pub fn confirmed_hits(&self) -> &[Coordinate] {
        match self {
            TargetingState::Hunt => &[],
            TargetingState::Target { confirmed_hits } => confirmed_hits,
        }
    }

    /// Untried cells worth shooting at next, in preference order.
    ///
    /// Returns `None` if the confirmed hits do not share a row or column.
    pub fn candidates(&self, history: &ShotHistory) -> Option<Vec<Coordinate>> {
        let grid_size = history.grid_size();
        let cells = match self.confirmed_hits() {
            [] => Vec::new(),
            [single] => single.neighbours(grid_size).collect(),
            hits => line_ends(hits, grid_size)?,
        };
        Some(cells.into_iter().filter(|c| !history.contains(*c)).collect())
    }

    /// State after learning that the shot at `coord` produced `outcome`.
    pub fn after(&self, coord: Coordinate, outcome: ShotOutcome) -> TargetingState {
        match (self, outcome) {
            (_, ShotOutcome::AlreadyFired) | (_, ShotOutcome::Miss) => self.clone(),
            (_, ShotOutcome::HitAndSunk(_)) | (_, ShotOutcome::FleetDestroyed(_)) => {
                if !self.is_hunting() {
                    debug!("target sunk at {}; hunting", coord);
                }
                TargetingState::Hunt
            }
            (TargetingState::Hunt, ShotOutcome::Hit) => {
                debug!("hit at {}; targeting", coord);
                TargetingState::Target {
                    confirmed_hits: vec![coord],
                }
            }
            (TargetingState::Target { confirmed_hits }, ShotOutcome::Hit) => {
                TargetingState::Target {
                    confirmed_hits: confirmed_hits
                        .iter()
                        .copied()
                        .chain(core::iter::once(coord))
                        .collect(),
                }
            }
        }
    }
}

/// The two cells just beyond the span of colinear `hits`, low end first.
fn line_ends(hits: &[Coordinate], grid_size: usize) -> Option<Vec<Coordinate>> {
    let first = hits[0];
    let (lo, hi) = if hits.iter().all(|h| h.row == first.row) {
        let min = hits.iter().map(|h| h.col).min()?;
        let max = hits.iter().map(|h| h.col).max()?;
        (
            Coordinate::new(first.row, min).offset(0, -1, grid_size),
            Coordinate::new(first.row, max).offset(0, 1, grid_size),
        )
    } else if hits.iter().all(|h| h.col == first.col) {
        let min = hits.iter().map(|h| h.row).min()?;
        let max = hits.iter().map(|h| h.row).max()?;
        (
            Coordinate::new(min, first.col).offset(-1, 0, grid_size),
            Coordinate::new(max, first.col).offset(1, 0, grid_size),
        )
    } else {
        return None;
    };
    Some(lo.into_iter().chain(hi).collect())
}

/// Pick a random untried coordinate, falling back to the first untried cell
/// in row-major order after [`HUNT_ATTEMPTS`] draws. `None` only when the
/// board is exhausted.
pub fn hunt<R: Rng + ?Sized>(rng: &mut R, history: &ShotHistory) -> Option<Coordinate> {
    let grid_size = history.grid_size();
    if grid_size == 0 || history.is_full() {
        return None;
    }
    for _ in 0..HUNT_ATTEMPTS {
        let coord = Coordinate::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !history.contains(coord) {
            return Some(coord);
        }
    }
    debug!("hunt draws exhausted; scanning for first untried cell");
    history.untried().next()
}

/// Choose the next shot from `state`, returning the state to continue from.
///
/// Target mode falls back to hunting when its line is exhausted or its hits
/// are inconsistent, so a shot is produced whenever an untried cell exists.
pub fn next_target<R: Rng + ?Sized>(
    state: &TargetingState,
    rng: &mut R,
    history: &ShotHistory,
) -> (TargetingState, Option<Coordinate>) {
    if state.is_hunting() {
        return (TargetingState::Hunt, hunt(rng, history));
    }
    match state.candidates(history) {
        Some(candidates) => match candidates.first() {
            Some(&coord) => (state.clone(), Some(coord)),
            None => {
                debug!(
                    "no candidates around {:?}; assuming sunk and hunting",
                    state.confirmed_hits()
                );
                (TargetingState::Hunt, hunt(rng, history))
            }
        },
        None => {
            warn!(
                "confirmed hits {:?} are not colinear; resetting to hunt",
                state.confirmed_hits()
            );
            (TargetingState::Hunt, hunt(rng, history))
        }
    }
}
