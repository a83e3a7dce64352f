//! Game orchestrator: phase state machine and turn sequencing for a human
//! player against the computer opponent.

use core::fmt;

use log::{debug, info, warn};
use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    board::{self, Board},
    common::{GameError, Side},
    config::GameConfig,
    coordinate::Coordinate,
    player::{AiPlayer, Player},
    ship::{Orientation, ShipId},
    shot::{self, ShotHistory, ShotOutcome},
};

/// Phase of a game. Only [`Game::reset_game`] moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Empty boards; nothing may be placed or fired yet.
    Setup,
    /// Opponent fleet placed; the human is placing ships.
    Placing,
    /// Turns alternate, human first.
    Playing,
    /// The given side destroyed the other's fleet.
    GameOver(Side),
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Setup => write!(f, "setup"),
            GamePhase::Placing => write!(f, "placement"),
            GamePhase::Playing => write!(f, "play"),
            GamePhase::GameOver(winner) => write!(f, "game over ({:?} won)", winner),
        }
    }
}

/// One human-versus-computer game. Owns both boards, both shot histories
/// and the opponent's targeting state.
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    turn: Side,
    rng: SmallRng,
    player_board: Board,
    opponent_board: Board,
    shots_at_player: ShotHistory,
    shots_at_opponent: ShotHistory,
    opponent: AiPlayer,
}

impl Game {
    /// Start a game in [`GamePhase::Setup`] seeded from the thread rng.
    #[cfg(feature = "std")]
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let mut seed_rng = rand::rng();
        Self::with_rng(config, SmallRng::from_rng(&mut seed_rng))
    }

    /// Start a reproducible game in [`GamePhase::Setup`].
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: SmallRng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::fresh(config, rng))
    }

    fn fresh(config: GameConfig, rng: SmallRng) -> Self {
        Game {
            player_board: Board::from_config(&config),
            opponent_board: Board::from_config(&config),
            shots_at_player: ShotHistory::new(config.grid_size),
            shots_at_opponent: ShotHistory::new(config.grid_size),
            opponent: AiPlayer::new(),
            phase: GamePhase::Setup,
            turn: Side::Player,
            config,
            rng,
        }
    }

    /// Discard boards, shot histories and opponent state and return to
    /// [`GamePhase::Setup`] with `config`. Legal in every phase. An invalid
    /// config leaves the game untouched.
    pub fn reset_game(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        let rng = self.rng.clone();
        *self = Self::fresh(config, rng);
        debug!("game reset");
        Ok(())
    }

    pub fn current_phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            GamePhase::GameOver(winner) => Some(winner),
            GamePhase::Setup | GamePhase::Placing | GamePhase::Playing => None,
        }
    }

    /// Side due to move. Only meaningful during [`GamePhase::Playing`].
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player_board,
            Side::Opponent => &self.opponent_board,
        }
    }

    /// Shots fired at `side`'s board.
    pub fn shots_at(&self, side: Side) -> &ShotHistory {
        match side {
            Side::Player => &self.shots_at_player,
            Side::Opponent => &self.shots_at_opponent,
        }
    }

    pub fn opponent(&self) -> &AiPlayer {
        &self.opponent
    }

    fn require(&self, phase: GamePhase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            warn!("rejected action: expected {} but game is in {}", phase, self.phase);
            Err(GameError::WrongPhase { actual: self.phase })
        }
    }

    /// Setup → Placing: fill the opponent's board at random.
    ///
    /// If the fleet cannot be placed the game stays in Setup and the call
    /// may be retried.
    pub fn begin_placement(&mut self) -> Result<(), GameError> {
        self.require(GamePhase::Setup)?;
        let placed = board::place_fleet(&self.config, &mut self.rng)
            .map_err(GameError::FleetPlacement)?;
        self.opponent_board = placed;
        self.phase = GamePhase::Placing;
        debug!("opponent fleet placed; waiting for player ships");
        Ok(())
    }

    /// Place one of the human's ships. Enters Playing once the fleet is
    /// complete. Rejected placements change nothing.
    pub fn place_ship(
        &mut self,
        ship: ShipId,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.require(GamePhase::Placing)?;
        self.player_board
            .place(ship, origin, orientation)
            .map_err(GameError::Placement)?;
        self.start_if_ready();
        Ok(())
    }

    /// Place every human ship not yet on the board at random.
    pub fn place_remaining_randomly(&mut self) -> Result<(), GameError> {
        self.require(GamePhase::Placing)?;
        let mut board = self.player_board.clone();
        board
            .place_remaining_randomly(&mut self.rng)
            .map_err(GameError::Placement)?;
        self.player_board = board;
        self.start_if_ready();
        Ok(())
    }

    fn start_if_ready(&mut self) {
        if self.player_board.is_fleet_complete() {
            self.phase = GamePhase::Playing;
            self.turn = Side::Player;
            info!("all ships placed; game started");
        }
    }

    /// Resolve a human shot against `target`, which must be the opponent.
    ///
    /// `AlreadyFired` leaves the turn with the human; any other outcome
    /// passes it to the opponent unless the fleet was destroyed.
    pub fn fire_shot(
        &mut self,
        target: Side,
        coord: Coordinate,
    ) -> Result<ShotOutcome, GameError> {
        self.require(GamePhase::Playing)?;
        if target != Side::Opponent {
            return Err(GameError::WrongTarget);
        }
        if self.turn != Side::Player {
            return Err(GameError::NotYourTurn);
        }
        let outcome = shot::resolve(&mut self.opponent_board, &mut self.shots_at_opponent, coord)
            .map_err(|_| GameError::OutOfBounds(coord))?;
        self.finish_turn(Side::Player, outcome);
        Ok(outcome)
    }

    /// Compute and resolve the opponent's shot against the human's board.
    ///
    /// Reads the shot history as left by the most recently resolved shot.
    pub fn request_opponent_move(&mut self) -> Result<(Coordinate, ShotOutcome), GameError> {
        self.require(GamePhase::Playing)?;
        if self.turn != Side::Opponent {
            return Err(GameError::NotYourTurn);
        }
        let coord = self
            .opponent
            .select_target(&mut self.rng, &self.shots_at_player)
            .ok_or(GameError::NoTargetsLeft)?;
        let outcome = shot::resolve(&mut self.player_board, &mut self.shots_at_player, coord)
            .map_err(|_| GameError::OutOfBounds(coord))?;
        if outcome == ShotOutcome::AlreadyFired {
            warn!("opponent re-fired at {}", coord);
        }
        self.opponent.handle_guess_result(coord, outcome);
        self.finish_turn(Side::Opponent, outcome);
        Ok((coord, outcome))
    }

    fn finish_turn(&mut self, shooter: Side, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::AlreadyFired => {}
            ShotOutcome::FleetDestroyed(_) => {
                self.phase = GamePhase::GameOver(shooter);
                info!("{:?} destroyed the enemy fleet", shooter);
            }
            ShotOutcome::Miss | ShotOutcome::Hit | ShotOutcome::HitAndSunk(_) => {
                self.turn = shooter.other();
            }
        }
    }
}
