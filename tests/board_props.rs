use std::collections::HashSet;

use broadside::{
    place_fleet, resolve, Coordinate, GameConfig, Orientation, ShotHistory, ShotOutcome,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placed_fleets_are_straight_and_disjoint(seed in any::<u64>()) {
        let config = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = place_fleet(&config, &mut rng).unwrap();

        let mut seen = HashSet::new();
        let lengths: Vec<usize> = board.ships().map(|s| s.length()).collect();
        prop_assert_eq!(lengths, config.ship_lengths.clone());
        for ship in board.ships() {
            prop_assert_eq!(ship.cells().len(), ship.length());
            let origin = ship.origin();
            for (i, &c) in ship.cells().iter().enumerate() {
                prop_assert!(c.in_bounds(config.grid_size));
                prop_assert!(seen.insert(c), "cell {} shared by two ships", c);
                prop_assert_eq!(board.cell(c), Some(ship.id()));
                let expected = match ship.orientation() {
                    Orientation::Horizontal => Coordinate::new(origin.row, origin.col + i),
                    Orientation::Vertical => Coordinate::new(origin.row + i, origin.col),
                };
                prop_assert_eq!(c, expected);
            }
        }
    }

    #[test]
    fn repeated_shots_are_no_ops(seed in any::<u64>(), row in 0..10usize, col in 0..10usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = place_fleet(&GameConfig::default(), &mut rng).unwrap();
        let mut history = ShotHistory::new(10);
        let coord = Coordinate::new(row, col);

        let first = resolve(&mut board, &mut history, coord).unwrap();
        prop_assert_ne!(first, ShotOutcome::AlreadyFired);
        prop_assert_eq!(first.is_hit(), board.cell(coord).is_some());
        let after_first = board.clone();

        for _ in 0..3 {
            prop_assert_eq!(
                resolve(&mut board, &mut history, coord).unwrap(),
                ShotOutcome::AlreadyFired
            );
        }
        prop_assert_eq!(&board, &after_first);
        prop_assert_eq!(history.len(), 1);
    }
}
