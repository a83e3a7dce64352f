use broadside::{
    BoardError, ConfigError, Coordinate, Game, GameConfig, GameError, GamePhase, Orientation,
    ShipId, ShotOutcome, Side, MAX_GRID_SIZE,
};

fn placing_game(seed: u64) -> Game {
    let mut game = Game::with_seed(GameConfig::default(), seed).unwrap();
    game.begin_placement().unwrap();
    game
}

fn playing_game(seed: u64) -> Game {
    let mut game = placing_game(seed);
    game.place_remaining_randomly().unwrap();
    game
}

/// First untried cell of the opponent's board in row-major order.
fn next_player_shot(game: &Game) -> Coordinate {
    game.shots_at(Side::Opponent).untried().next().unwrap()
}

#[test]
fn test_setup_rejects_everything_but_placement_start() {
    let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
    assert_eq!(game.current_phase(), GamePhase::Setup);
    assert_eq!(game.winner(), None);

    let wrong = GameError::WrongPhase {
        actual: GamePhase::Setup,
    };
    assert_eq!(
        game.fire_shot(Side::Opponent, Coordinate::new(0, 0)),
        Err(wrong.clone())
    );
    assert_eq!(game.request_opponent_move(), Err(wrong.clone()));
    assert_eq!(
        game.place_ship(ShipId(0), Coordinate::new(0, 0), Orientation::Horizontal),
        Err(wrong)
    );
    assert!(game.shots_at(Side::Opponent).is_empty());
    assert_eq!(game.board(Side::Opponent).ships().count(), 0);
}

#[test]
fn test_begin_placement_fills_opponent_board() {
    let mut game = placing_game(2);
    assert_eq!(game.current_phase(), GamePhase::Placing);
    assert!(game.board(Side::Opponent).is_fleet_complete());
    assert_eq!(game.board(Side::Player).ships().count(), 0);
    assert_eq!(
        game.begin_placement(),
        Err(GameError::WrongPhase {
            actual: GamePhase::Placing
        })
    );
}

#[test]
fn test_auto_placement_completes_player_fleet_only() {
    let mut game = placing_game(4);
    let opponent_board = game.board(Side::Opponent).clone();
    game.place_ship(ShipId(0), Coordinate::new(0, 0), Orientation::Horizontal)
        .unwrap();

    game.place_remaining_randomly().unwrap();
    assert_eq!(game.current_phase(), GamePhase::Playing);
    assert!(game.board(Side::Player).is_fleet_complete());
    assert_eq!(
        game.board(Side::Player).ship(ShipId(0)).map(|s| s.origin()),
        Some(Coordinate::new(0, 0))
    );
    assert_eq!(game.board(Side::Opponent), &opponent_board);
    assert!(game.opponent().state().is_hunting());
}

#[test]
fn test_manual_placement_starts_play_when_complete() {
    let mut game = placing_game(3);

    assert_eq!(
        game.place_ship(ShipId(1), Coordinate::new(0, 7), Orientation::Horizontal),
        Err(GameError::Placement(BoardError::ShipOutOfBounds))
    );
    assert_eq!(game.board(Side::Player).ships().count(), 0);

    let layout = [
        (0, (0, 0), Orientation::Horizontal),
        (1, (2, 0), Orientation::Vertical),
        (2, (4, 4), Orientation::Horizontal),
        (3, (7, 2), Orientation::Vertical),
    ];
    for (id, origin, orient) in layout {
        game.place_ship(ShipId(id), origin.into(), orient).unwrap();
        assert_eq!(game.current_phase(), GamePhase::Placing);
    }
    assert_eq!(
        game.place_ship(ShipId(4), Coordinate::new(0, 3), Orientation::Vertical),
        Err(GameError::Placement(BoardError::ShipOverlaps))
    );
    game.place_ship(ShipId(4), Coordinate::new(8, 9), Orientation::Vertical).unwrap();
    assert_eq!(game.current_phase(), GamePhase::Playing);
    assert_eq!(game.turn(), Side::Player);
}

#[test]
fn test_turns_alternate_and_repeat_shots_keep_the_turn() {
    let mut game = playing_game(4);

    assert_eq!(game.request_opponent_move(), Err(GameError::NotYourTurn));
    assert_eq!(
        game.fire_shot(Side::Player, Coordinate::new(0, 0)),
        Err(GameError::WrongTarget)
    );
    assert_eq!(
        game.fire_shot(Side::Opponent, Coordinate::new(10, 0)),
        Err(GameError::OutOfBounds(Coordinate::new(10, 0)))
    );

    let target = Coordinate::new(5, 5);
    let first = game.fire_shot(Side::Opponent, target).unwrap();
    assert_ne!(first, ShotOutcome::AlreadyFired);
    assert_eq!(game.turn(), Side::Opponent);
    assert_eq!(
        game.fire_shot(Side::Opponent, Coordinate::new(1, 1)),
        Err(GameError::NotYourTurn)
    );

    let (coord, outcome) = game.request_opponent_move().unwrap();
    assert!(coord.in_bounds(10));
    assert_ne!(outcome, ShotOutcome::AlreadyFired);
    assert!(game.shots_at(Side::Player).contains(coord));
    assert_eq!(game.turn(), Side::Player);

    assert_eq!(game.fire_shot(Side::Opponent, target).unwrap(), ShotOutcome::AlreadyFired);
    assert_eq!(game.turn(), Side::Player);
    assert_eq!(game.shots_at(Side::Opponent).len(), 1);
}

#[test]
fn test_full_game_ends_and_resets() {
    for seed in 0..8 {
        let mut game = playing_game(seed);
        let mut opponent_shots = Vec::new();

        while game.winner().is_none() {
            let coord = next_player_shot(&game);
            game.fire_shot(Side::Opponent, coord).unwrap();
            if game.winner().is_some() {
                break;
            }
            let (coord, _) = game.request_opponent_move().unwrap();
            assert!(!opponent_shots.contains(&coord));
            opponent_shots.push(coord);
        }

        let winner = game.winner().unwrap();
        assert_eq!(game.current_phase(), GamePhase::GameOver(winner));
        assert!(game.board(winner.other()).all_sunk());
        assert!(!game.board(winner).all_sunk());
        assert_eq!(
            game.fire_shot(Side::Opponent, Coordinate::new(0, 0)),
            Err(GameError::WrongPhase {
                actual: GamePhase::GameOver(winner)
            })
        );

        game.reset_game(GameConfig::new(8, vec![3, 2])).unwrap();
        assert_eq!(game.current_phase(), GamePhase::Setup);
        assert_eq!(game.winner(), None);
        assert!(game.shots_at(Side::Player).is_empty());
        assert!(game.shots_at(Side::Opponent).is_empty());
        assert!(game.opponent().state().is_hunting());
        assert_eq!(game.board(Side::Player).grid_size(), 8);
        game.begin_placement().unwrap();
        assert_eq!(game.board(Side::Opponent).ships().count(), 2);
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    assert_eq!(
        Game::with_seed(GameConfig::new(3, vec![4]), 0).err(),
        Some(GameError::Config(ConfigError::ShipTooLong {
            index: 0,
            length: 4,
            grid_size: 3
        }))
    );

    let mut game = playing_game(9);
    assert_eq!(
        game.reset_game(GameConfig::new(0, vec![1])),
        Err(GameError::Config(ConfigError::EmptyGrid))
    );
    assert_eq!(game.current_phase(), GamePhase::Playing);
}

#[test]
fn test_oversized_grid_is_rejected_without_overflow() {
    for grid_size in [MAX_GRID_SIZE + 1, usize::MAX / 2 + 1, usize::MAX] {
        let config = GameConfig::new(grid_size, vec![1]);
        let too_large = ConfigError::GridTooLarge {
            grid_size,
            max: MAX_GRID_SIZE,
        };
        assert_eq!(config.validate(), Err(too_large.clone()));
        assert_eq!(
            Game::with_seed(config, 0).err(),
            Some(GameError::Config(too_large))
        );
    }

    let largest = GameConfig::new(MAX_GRID_SIZE, vec![MAX_GRID_SIZE, 2]);
    assert_eq!(largest.validate(), Ok(()));
    assert_eq!(
        GameConfig::new(4, vec![usize::MAX, usize::MAX]).validate(),
        Err(ConfigError::ShipTooLong {
            index: 0,
            length: usize::MAX,
            grid_size: 4
        })
    );
}

#[test]
fn test_failed_fleet_placement_stays_in_setup_and_can_retry() {
    // Nine cells on a 3x3 grid: random placement regularly paints itself
    // into a corner.
    let config = GameConfig::new(3, vec![2, 2, 2, 2, 1]);
    let mut game = (0..256)
        .map(|seed| Game::with_seed(config.clone(), seed).unwrap())
        .find_map(|mut game| match game.begin_placement() {
            Err(err) => Some((game, err)),
            Ok(()) => None,
        })
        .map(|(game, err)| {
            assert!(
                matches!(
                    err,
                    GameError::FleetPlacement(BoardError::UnableToPlaceShip { .. })
                ),
                "unexpected error {:?}",
                err
            );
            game
        })
        .expect("some seed fails to place the fleet");

    assert_eq!(game.current_phase(), GamePhase::Setup);
    assert_eq!(game.board(Side::Opponent).ships().count(), 0);
    assert_eq!(
        game.place_ship(ShipId(0), Coordinate::new(0, 0), Orientation::Horizontal),
        Err(GameError::WrongPhase {
            actual: GamePhase::Setup
        })
    );

    let placed = (0..5000).any(|_| game.begin_placement().is_ok());
    assert!(placed, "fleet placement never succeeded");
    assert_eq!(game.current_phase(), GamePhase::Placing);
    assert!(game.board(Side::Opponent).is_fleet_complete());
    assert_eq!(game.board(Side::Opponent).ships().count(), 5);
}

#[test]
fn test_config_validation_and_names() {
    let config = GameConfig::default();
    assert_eq!(config.grid_size, 10);
    assert_eq!(config.ship_lengths, vec![5, 4, 3, 3, 2]);
    assert_eq!(config.total_ship_cells(), 17);
    assert_eq!(config.validate(), Ok(()));

    let names: Vec<String> = config.ship_types().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["Carrier", "Battleship", "Cruiser", "Submarine", "Destroyer"]);
    let extra = GameConfig::new(10, vec![2, 2, 2, 2, 2, 1]).ship_types();
    assert_eq!(extra[5].name(), "Ship 6");

    assert_eq!(GameConfig::new(5, vec![]).validate(), Err(ConfigError::EmptyFleet));
    assert_eq!(
        GameConfig::new(5, vec![2, 0]).validate(),
        Err(ConfigError::ZeroLengthShip { index: 1 })
    );
    assert_eq!(
        GameConfig::new(2, vec![2, 2, 1]).validate(),
        Err(ConfigError::FleetTooLarge { cells: 5, grid_size: 2 })
    );
}

#[test]
fn test_config_from_json_uses_defaults() {
    let config: GameConfig = serde_json::from_str(r#"{"gridSize": 8}"#).unwrap();
    assert_eq!(config, GameConfig::new(8, vec![5, 4, 3, 3, 2]));
    let config: GameConfig = serde_json::from_str(r#"{"shipLengths": [2, 2]}"#).unwrap();
    assert_eq!(config, GameConfig::new(10, vec![2, 2]));
}
