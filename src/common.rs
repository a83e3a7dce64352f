//! Common types for the game: sides and error taxonomy.

use core::fmt;

use crate::config::ConfigError;
use crate::coordinate::Coordinate;
use crate::game::GamePhase;
use crate::ship::ShipId;

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The human player.
    Player,
    /// The computer opponent.
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    OutOfBounds(Coordinate),
    /// Ship run leaves the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// Ship id is not part of the configured fleet.
    UnknownShip(ShipId),
    /// Random placement ran out of attempts for this ship.
    UnableToPlaceShip { ship: ShipId },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(c) => write!(f, "Coordinate {} is off the board", c),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::UnknownShip(id) => write!(f, "Ship {} is not in the fleet", id),
            BoardError::UnableToPlaceShip { ship } => write!(f, "Unable to place ship {}", ship),
        }
    }
}

impl std::error::Error for BoardError {}

/// Errors returned by the game orchestrator. All are recoverable and leave
/// the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Action is not legal in the current phase.
    WrongPhase { actual: GamePhase },
    /// The other side is due to move.
    NotYourTurn,
    /// The human may only fire at the opponent's board.
    WrongTarget,
    /// Shot coordinate lies outside the grid.
    OutOfBounds(Coordinate),
    /// Human ship placement was rejected.
    Placement(BoardError),
    /// Opponent fleet could not be placed; setup was aborted.
    FleetPlacement(BoardError),
    /// Every cell of the target board has already been fired at.
    NoTargetsLeft,
    /// Configuration was rejected.
    Config(ConfigError),
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase { actual } => write!(f, "Action not allowed during {}", actual),
            GameError::NotYourTurn => write!(f, "It is not this side's turn"),
            GameError::WrongTarget => write!(f, "Shots must target the opponent's board"),
            GameError::OutOfBounds(c) => write!(f, "Shot at {} is off the board", c),
            GameError::Placement(e) => write!(f, "Placement rejected: {}", e),
            GameError::FleetPlacement(e) => write!(f, "Fleet placement failed: {}", e),
            GameError::NoTargetsLeft => write!(f, "No untried coordinates remain"),
            GameError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for GameError {}
