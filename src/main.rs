//! Interactive terminal game of Quantum Squares
//!
//! Usage: cargo run -- [--opponent human|ai] [--ai-first] [--board-size 5]

use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use log::info;

use quantum_squares::agent::GreedyAgent;
use quantum_squares::display::{
    display_board, display_move_scores, display_place_outcome, display_player, format_pos, BOLD, DIM, RESET,
};
use quantum_squares::view::GameView;
use quantum_squares::{
    new_game, place, GameConfig, GameState, PlaceOutcome, PlayerIdx, DEFAULT_BOARD_SIZE, DEFAULT_CAPACITY,
    DEFAULT_WIN_THRESHOLD,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Opponent {
    Human,
    Ai,
}

/// Play Quantum Squares in the terminal
#[derive(Parser, Debug)]
#[command(name = "quantum-squares")]
#[command(about = "Two-player chain-reaction territory game", long_about = None)]
struct Args {
    /// Who plays Blue (or Red with --ai-first)
    #[arg(long, value_enum, default_value_t = Opponent::Ai)]
    opponent: Opponent,

    /// Let the AI play Red and move first
    #[arg(long)]
    ai_first: bool,

    /// Side length of the board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: usize,

    /// Ledger score that ends the game
    #[arg(long, default_value_t = DEFAULT_WIN_THRESHOLD)]
    win_threshold: i32,

    /// Particles a cell holds before collapsing
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: u8,

    /// Show the AI's ranking of your candidate moves each turn
    #[arg(long)]
    hints: bool,
}

enum Command {
    Place(isize, isize),
    Restart,
    Json,
    Quit,
}

fn read_command(player: PlayerIdx) -> io::Result<Command> {
    loop {
        print!(
            "\n{BOLD}{} move (row col, r = restart, j = json, q = quit):{RESET} ",
            display_player(player)
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            return Ok(Command::Quit);
        }

        let input = input.trim();
        match input {
            "q" | "quit" => return Ok(Command::Quit),
            "r" | "restart" => return Ok(Command::Restart),
            "j" | "json" => return Ok(Command::Json),
            _ => {}
        }

        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        match parts.as_slice() {
            [r, c] => match (r.parse::<isize>(), c.parse::<isize>()) {
                (Ok(r), Ok(c)) => return Ok(Command::Place(r, c)),
                _ => println!("Row and column must be numbers"),
            },
            _ => println!("Enter a row and a column, e.g. '2 3'"),
        }
    }
}

fn is_ai_turn(args: &Args, state: &GameState) -> bool {
    let ai_seat: PlayerIdx = if args.ai_first { 0 } else { 1 };
    args.opponent == Opponent::Ai && state.current_player == ai_seat
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = GameConfig {
        board_size: args.board_size,
        win_threshold: args.win_threshold,
        capacity: args.capacity,
    };
    info!("starting game with {config:?}, opponent {:?}", args.opponent);

    let agent = GreedyAgent::new();
    let mut state = new_game(config)?;
    let mut last: Option<PlaceOutcome> = None;

    println!("\n{BOLD}Welcome to Quantum Squares!{RESET}");
    println!(
        "A cell collapses at {} particles and scatters them to its neighbours.",
        config.capacity
    );
    println!("First to {} captures wins.", config.win_threshold);

    loop {
        display_board(&state);

        if state.game_over {
            print!("\n{DIM}Press 'r' to play again or 'q' to quit:{RESET} ");
            io::stdout().flush()?;
            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 || input.trim() != "r" {
                println!("Goodbye!");
                return Ok(());
            }
            state = new_game(config)?;
            last = None;
            continue;
        }

        let player = state.current_player;

        if is_ai_turn(&args, &state) {
            println!("{DIM}AI is thinking...{RESET}");
            let Some(choice) = agent.best_move(&state, player) else {
                println!("No legal moves remain.");
                return Ok(());
            };
            println!("AI plays {} (score {:.2})", format_pos(choice.pos), choice.total);
            let out = place(&mut state, choice.pos.row as isize, choice.pos.col as isize)?;
            display_place_outcome(&out);
            last = Some(out);
            continue;
        }

        if args.hints {
            let mut scores = agent.score_moves(&state, player);
            if player == 0 {
                scores.sort_by(|a, b| b.total.total_cmp(&a.total));
            } else {
                scores.sort_by(|a, b| a.total.total_cmp(&b.total));
            }
            println!();
            display_move_scores(&scores, 5);
        }

        match read_command(player)? {
            Command::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Command::Restart => {
                state = new_game(config)?;
                last = None;
            }
            Command::Json => {
                println!("{}", GameView::new(&state, last.as_ref()).to_json()?);
            }
            Command::Place(row, col) => match place(&mut state, row, col) {
                Ok(out) => {
                    display_place_outcome(&out);
                    last = Some(out);
                }
                Err(e) => println!("Invalid move: {e}"),
            },
        }
    }
}
