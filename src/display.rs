//! Shared display utilities for rendering Quantum Squares in the terminal
//!
//! Provides colorized, human-readable output for the board, scores, and
//! particle movements.

use quantum_squares_agent::MoveScore;
use quantum_squares_engine::{outcome, GameState, Outcome, ParticleMove, PlaceOutcome, PlayerIdx, Pos};

// ANSI color codes
pub const RED: &str = "\x1b[91m";
pub const BLUE: &str = "\x1b[94m";
pub const GREY: &str = "\x1b[90m";
pub const YELLOW: &str = "\x1b[93m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub fn player_code(player: PlayerIdx) -> &'static str {
    match player {
        0 => RED,
        _ => BLUE,
    }
}

pub fn player_name(player: PlayerIdx) -> &'static str {
    match player {
        0 => "Red",
        _ => "Blue",
    }
}

pub fn display_player(player: PlayerIdx) -> String {
    format!("{}{}{}", player_code(player), player_name(player), RESET)
}

pub fn format_pos(pos: Pos) -> String {
    format!("({}, {})", pos.row, pos.col)
}

/// One-line summary of a finished game
pub fn format_outcome(result: Outcome) -> String {
    match result {
        Outcome::Winner(p) => format!("{BOLD}{} Wins!{RESET}", display_player(p)),
        Outcome::Tie => format!("{YELLOW}{BOLD}It's a Tie!{RESET}"),
    }
}

fn format_move(m: &ParticleMove) -> String {
    if m.from == m.to {
        format!("{}*{} {}", player_code(m.owner), RESET, format_pos(m.to))
    } else {
        format!(
            "{} {}->{} {}",
            format_pos(m.from),
            player_code(m.owner),
            RESET,
            format_pos(m.to)
        )
    }
}

/// Display the board with scores and whose turn it is
pub fn display_board(state: &GameState) {
    let size = state.board.size();
    println!("\n{BOLD}══════════════════════════════════════{RESET}");
    if state.game_over {
        println!("{BOLD}  Game Over{RESET}");
    } else {
        println!(
            "{BOLD}  {}'s Turn{RESET}",
            display_player(state.current_player)
        );
    }
    println!("{BOLD}══════════════════════════════════════{RESET}\n");

    print!("     ");
    for col in 0..size {
        print!("{DIM}{col:^4}{RESET}");
    }
    println!();

    for (row, cells) in state.board.rows().enumerate() {
        print!("  {DIM}{row:>2}{RESET} ");
        for cell in cells {
            match cell.owner {
                Some(p) => print!("{}[{}]{} ", player_code(p), cell.particles, RESET),
                None => print!("{GREY}[ ]{RESET} "),
            }
        }
        println!();
    }

    println!(
        "\n  {RED}Red: {}{RESET}  {BLUE}Blue: {}{RESET}   {DIM}(first to {}){RESET}",
        state.scores[0], state.scores[1], state.config.win_threshold
    );

    if let Some(result) = outcome(state) {
        println!("\n  {}", format_outcome(result));
    }
}

/// Describe what a placement did, including each particle movement
pub fn display_place_outcome(out: &PlaceOutcome) {
    if !out.collapsed() {
        println!(
            "{} placed at {}",
            display_player(out.player),
            format_pos(out.pos)
        );
        return;
    }

    println!(
        "{} placed at {} {BOLD}-> {} collapse{}{RESET}",
        display_player(out.player),
        format_pos(out.pos),
        out.collapses,
        if out.collapses == 1 { "" } else { "s" }
    );
    let moves: Vec<String> = out.events.iter().map(format_move).collect();
    for chunk in moves.chunks(4) {
        println!("  {DIM}{}{RESET}", chunk.join("   "));
    }
}

/// Table of candidate moves as scored by the greedy search
pub fn display_move_scores(scores: &[MoveScore], limit: usize) {
    println!(
        "{BOLD}{:<10} {:>8} {:>8} {:>8} {:>8} {:>8}{RESET}",
        "move", "eval", "collapse", "hot", "centre", "total"
    );
    for s in scores.iter().take(limit) {
        println!(
            "{:<10} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            format_pos(s.pos),
            s.evaluation,
            s.collapse_bonus,
            s.hot_neighbor_penalty,
            s.center_bias,
            s.total
        );
    }
}
