use broadside::{init_logging, AiPlayer, Game, GameConfig, GameError, Player, Side, STANDARD_FLEET};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

/// Play complete games with the human side driven by a second computer
/// player, printing one JSON summary per game.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1)]
    games: u32,
    #[arg(long, default_value_t = broadside::DEFAULT_GRID_SIZE)]
    grid_size: usize,
    #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. 5,4,3,3,2")]
    ships: Vec<usize>,
}

/// Setup attempts before giving up on a game.
const SETUP_RETRIES: usize = 3;

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let ship_lengths = if cli.ships.is_empty() {
        STANDARD_FLEET.to_vec()
    } else {
        cli.ships.clone()
    };
    let config = GameConfig::new(cli.grid_size, ship_lengths);
    config.validate()?;

    let base_seed = match cli.seed {
        Some(s) => s,
        None => rand::random(),
    };

    for i in 0..cli.games {
        let seed = base_seed.wrapping_add(u64::from(i));
        let summary = play(config.clone(), seed)?;
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

fn play(config: GameConfig, seed: u64) -> anyhow::Result<serde_json::Value> {
    let mut game = Game::with_seed(config.clone(), seed)?;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match game.begin_placement() {
            Ok(()) => break,
            Err(e @ GameError::FleetPlacement(_)) if attempt < SETUP_RETRIES => {
                log::warn!("setup attempt {} failed: {}", attempt, e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    game.place_remaining_randomly()?;

    let mut driver = AiPlayer::new();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));

    while game.winner().is_none() {
        let coord = driver
            .select_target(&mut rng, game.shots_at(Side::Opponent))
            .ok_or(GameError::NoTargetsLeft)?;
        let outcome = game.fire_shot(Side::Opponent, coord)?;
        driver.handle_guess_result(coord, outcome);
        if game.winner().is_some() {
            break;
        }
        game.request_opponent_move()?;
    }

    Ok(json!({
        "seed": seed,
        "config": config,
        "winner": game.winner(),
        "playerShots": game.shots_at(Side::Opponent).len(),
        "opponentShots": game.shots_at(Side::Player).len(),
    }))
}
