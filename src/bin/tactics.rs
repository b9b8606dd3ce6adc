//! Tactical regression checks for the greedy agent.
//!
//! Runs a small suite of hand-constructed positions with one clearly right
//! answer (take the collapse, steal a loaded cell, open in the centre) and
//! reports the agent's success rate.

use clap::Parser;

use quantum_squares::agent::{GreedyAgent, GreedyConfig};
use quantum_squares::display::{display_board, display_move_scores, format_pos, BOLD, RESET};
use quantum_squares::{Cell, GameState, PlayerIdx, Pos};

#[derive(Parser, Debug)]
#[command(name = "tactics")]
#[command(about = "Run tactical regression checks on the greedy agent", long_about = None)]
struct Args {
    /// Bonus for collapsing the placed cell
    #[arg(long, default_value_t = GreedyConfig::default().collapse_bonus)]
    collapse_bonus: f64,

    /// Penalty per loaded neighbour left to the other side
    #[arg(long, default_value_t = GreedyConfig::default().hot_neighbor_penalty)]
    hot_neighbor_penalty: f64,

    /// Weight of the distance-from-centre term
    #[arg(long, default_value_t = GreedyConfig::default().center_weight)]
    center_weight: f64,

    /// Print the board and move table for every case
    #[arg(long)]
    verbose: bool,
}

struct Tactic {
    name: &'static str,
    state: GameState,
    player: PlayerIdx,
    expected: Vec<Pos>,
}

fn put(state: &mut GameState, row: usize, col: usize, particles: u8, owner: PlayerIdx) {
    *state.board.cell_mut(Pos::new(row, col)) = Cell {
        particles,
        owner: Some(owner),
    };
}

fn position(player: PlayerIdx) -> GameState {
    let mut state = GameState::default();
    state.current_player = player;
    state
}

fn suite() -> Vec<Tactic> {
    let mut cases = Vec::new();

    // Open board: Red opens in the centre.
    cases.push(Tactic {
        name: "open_centre",
        state: position(0),
        player: 0,
        expected: vec![Pos::new(2, 2)],
    });

    // A loaded red cell on the edge: collapsing it beats any quiet move.
    for player in [0, 1] {
        let mut state = position(player);
        put(&mut state, 0, 2, 3, player);
        put(&mut state, 3, 3, 1, 1 - player);
        cases.push(Tactic {
            name: if player == 0 { "take_collapse_red" } else { "take_collapse_blue" },
            state,
            player,
            expected: vec![Pos::new(0, 2)],
        });
    }

    // The opponent has a loaded cell: placing on it takes it over and collapses it.
    {
        let mut state = position(0);
        put(&mut state, 1, 3, 3, 1);
        put(&mut state, 4, 0, 2, 0);
        cases.push(Tactic {
            name: "steal_loaded_cell",
            state,
            player: 0,
            expected: vec![Pos::new(1, 3)],
        });
    }

    // Chain: Red's collapse at (2,1) tips Blue's loaded (2,2) as well.
    {
        let mut state = position(0);
        put(&mut state, 2, 1, 3, 0);
        put(&mut state, 2, 2, 3, 1);
        put(&mut state, 0, 4, 3, 0);
        state.scores = [0, 3];
        cases.push(Tactic {
            name: "prefer_chain",
            state,
            player: 0,
            expected: vec![Pos::new(2, 1), Pos::new(2, 2)],
        });
    }

    cases
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let agent = GreedyAgent::with_config(GreedyConfig {
        collapse_bonus: args.collapse_bonus,
        hot_neighbor_penalty: args.hot_neighbor_penalty,
        center_weight: args.center_weight,
    });

    let mut successes = 0usize;
    let mut total = 0usize;

    for case in suite() {
        let chosen = agent.best_move(&case.state, case.player).map(|s| s.pos);
        let ok = chosen.is_some_and(|p| case.expected.contains(&p));
        total += 1;
        if ok {
            successes += 1;
        }

        println!(
            "{}: chose {} -> {}",
            case.name,
            chosen.map(format_pos).unwrap_or_else(|| "nothing".to_string()),
            if ok { "OK" } else { "MISS" }
        );

        if args.verbose || !ok {
            display_board(&case.state);
            let mut scores = agent.score_moves(&case.state, case.player);
            if case.player == 0 {
                scores.sort_by(|a, b| b.total.total_cmp(&a.total));
            } else {
                scores.sort_by(|a, b| a.total.total_cmp(&b.total));
            }
            display_move_scores(&scores, 5);
            println!();
        }
    }

    println!();
    println!(
        "{BOLD}Summary:{RESET} {successes}/{total} ({:.1}%)",
        100.0 * (successes as f32) / (total.max(1) as f32)
    );

    Ok(())
}
