//! Pit two agents against each other over a series of seeded games.
//!
//! Usage: cargo run --bin arena -- --red greedy --blue random --games 100

use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quantum_squares::agent::{
    play_match, Agent, ArenaSummary, GreedyAgent, MatchResult, RandomAgent, DEFAULT_MAX_MOVES,
};
use quantum_squares::display::{format_outcome, BOLD, DIM, RESET};
use quantum_squares::{GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_CAPACITY, DEFAULT_WIN_THRESHOLD};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum AgentKind {
    Greedy,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Play agents against each other and tally results", long_about = None)]
struct Args {
    /// Agent playing Red (moves first)
    #[arg(long, value_enum, default_value_t = AgentKind::Greedy)]
    red: AgentKind,

    /// Agent playing Blue
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    blue: AgentKind,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Move limit per game
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    max_moves: u32,

    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: usize,

    #[arg(long, default_value_t = DEFAULT_WIN_THRESHOLD)]
    win_threshold: i32,

    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: u8,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print each game's result as a JSON line instead of a summary line
    #[arg(long)]
    json: bool,
}

fn run_one(
    red: AgentKind,
    blue: AgentKind,
    config: GameConfig,
    max_moves: u32,
    rng: &mut StdRng,
) -> Result<MatchResult, quantum_squares::ConfigError> {
    // Monomorphised per pairing since Agent::select_move is generic over the rng.
    match (red, blue) {
        (AgentKind::Greedy, AgentKind::Greedy) => {
            play_match(config, &mut GreedyAgent::new(), &mut GreedyAgent::new(), max_moves, rng)
        }
        (AgentKind::Greedy, AgentKind::Random) => {
            play_match(config, &mut GreedyAgent::new(), &mut RandomAgent::new(), max_moves, rng)
        }
        (AgentKind::Random, AgentKind::Greedy) => {
            play_match(config, &mut RandomAgent::new(), &mut GreedyAgent::new(), max_moves, rng)
        }
        (AgentKind::Random, AgentKind::Random) => {
            play_match(config, &mut RandomAgent::new(), &mut RandomAgent::new(), max_moves, rng)
        }
    }
}

fn label(kind: AgentKind) -> String {
    match kind {
        AgentKind::Greedy => GreedyAgent::new().name().to_string(),
        AgentKind::Random => RandomAgent::new().name().to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = GameConfig {
        board_size: args.board_size,
        win_threshold: args.win_threshold,
        capacity: args.capacity,
    };
    config.validate()?;

    info!(
        "{} games: {} (Red) vs {} (Blue), {config:?}, seed {}",
        args.games,
        label(args.red),
        label(args.blue),
        args.seed
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut summary = ArenaSummary::default();

    for game in 0..args.games {
        let result = run_one(args.red, args.blue, config, args.max_moves, &mut rng)?;
        summary.record(&result);

        if args.json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            let verdict = match result.outcome {
                Some(o) => format_outcome(o),
                None => format!("{DIM}unfinished{RESET}"),
            };
            println!(
                "game {game:>4}: {verdict}  {DIM}scores {:?}, {} moves, {} collapses{RESET}",
                result.scores, result.moves, result.collapses
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!();
    println!("{BOLD}Summary over {} games{RESET}", summary.games);
    println!(
        "  Red  ({:>6}): {} wins ({:.1}%)",
        label(args.red),
        summary.wins[0],
        100.0 * summary.win_rate(0)
    );
    println!(
        "  Blue ({:>6}): {} wins ({:.1}%)",
        label(args.blue),
        summary.wins[1],
        100.0 * summary.win_rate(1)
    );
    println!("  Ties: {}  Unfinished: {}", summary.ties, summary.unfinished);
    println!("  Mean game length: {:.1} moves", summary.mean_moves());

    Ok(())
}
