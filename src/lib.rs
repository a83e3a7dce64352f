//! Single-player Battleship against a hunt/target computer opponent.
//!
//! The crate covers the game state only: boards and fleets, placement
//! validation, shot resolution, the opponent's targeting and the phase
//! machine sequencing a game. Rendering and input are left to the caller.

mod ai;
mod board;
mod common;
mod config;
mod coordinate;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod ship;
mod shot;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LogFilter};
pub use player::*;
pub use ship::*;
pub use shot::*;
