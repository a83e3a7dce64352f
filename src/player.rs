//! Player trait and the hunt/target computer player.

use rand::Rng;

use crate::{
    ai::{self, TargetingState},
    board::Board,
    common::BoardError,
    coordinate::Coordinate,
    shot::{ShotHistory, ShotOutcome},
};

/// Interface implemented by automated players.
///
/// A Player is responsible for:
/// - Placing ships on the board
/// - Selecting targets to attack
/// - Handling feedback from its shots
pub trait Player {
    /// Place all remaining ships onto the provided board.
    fn place_ships<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(), BoardError>;

    /// Choose the next target given the history of shots at the enemy board.
    /// Returns `None` only when every cell has been fired at.
    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        history: &ShotHistory,
    ) -> Option<Coordinate>;

    /// Inform the player of the result of its last shot.
    fn handle_guess_result(&mut self, _coord: Coordinate, _result: ShotOutcome) {}
}

/// Computer player that hunts at random and then follows up on hits.
#[derive(Debug, Clone, Default)]
pub struct AiPlayer {
    state: TargetingState,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current targeting mode.
    pub fn state(&self) -> &TargetingState {
        &self.state
    }

    /// Target-mode candidates for the next shot; empty while hunting.
    pub fn candidates(&self, history: &ShotHistory) -> Vec<Coordinate> {
        self.state.candidates(history).unwrap_or_default()
    }
}

impl Player for AiPlayer {
    fn place_ships<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(), BoardError> {
        board.place_remaining_randomly(rng)
    }

    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        history: &ShotHistory,
    ) -> Option<Coordinate> {
        let (state, target) = ai::next_target(&self.state, rng, history);
        self.state = state;
        target
    }

    fn handle_guess_result(&mut self, coord: Coordinate, result: ShotOutcome) {
        self.state = self.state.after(coord, result);
    }
}
