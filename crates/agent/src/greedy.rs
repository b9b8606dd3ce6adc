//! One-ply greedy search.
//!
//! Every legal move is played on a clone of the state, the result is scored
//! with the static evaluator, and tactical adjustments are layered on top:
//! a bonus for collapsing the placed cell, a penalty for each neighbour left
//! one particle short of capacity in someone else's hands, and a small pull
//! towards the centre. Player 0 maximises the total, player 1 minimises it.

use log::debug;
use rand::Rng;
use serde::Serialize;

use quantum_squares_engine::{evaluate, legal_moves, place, GameState, InvalidMove, PlayerIdx, Pos};

use crate::Agent;

/// Weights for the tactical adjustments
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GreedyConfig {
    /// Added (player 0) or subtracted (player 1) when the placed cell collapses
    pub collapse_bonus: f64,
    /// Charged per neighbour left at capacity - 1 under another owner
    pub hot_neighbor_penalty: f64,
    /// Subtracted per unit of Manhattan distance from the centre
    pub center_weight: f64,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        GreedyConfig {
            collapse_bonus: 10.0,
            hot_neighbor_penalty: 5.0,
            center_weight: 0.1,
        }
    }
}

/// Score of one candidate move, broken into its parts.
/// Each adjustment is stored already signed, so `total` is their plain sum.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MoveScore {
    pub pos: Pos,
    /// `evaluate` of the state after the move
    pub evaluation: f64,
    pub collapse_bonus: f64,
    pub hot_neighbor_penalty: f64,
    pub center_bias: f64,
    pub total: f64,
}

/// Greedy one-ply searcher
#[derive(Clone, Debug, Default)]
pub struct GreedyAgent {
    config: GreedyConfig,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::with_config(GreedyConfig::default())
    }

    pub fn with_config(config: GreedyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }

    /// Score playing `pos` as `player`. `state` itself is never touched;
    /// the move is simulated on a clone, which is reopened if the game has
    /// already ended.
    ///
    /// Fails with [`InvalidMove::OutOfBounds`] if `pos` is off the board.
    pub fn score_move(&self, state: &GameState, pos: Pos, player: PlayerIdx) -> Result<MoveScore, InvalidMove> {
        let mut sim = state.clone();
        sim.current_player = player;
        sim.game_over = false;
        let collapsed = place(&mut sim, pos.row as isize, pos.col as isize)?.collapsed();

        let sign = if player == 0 { 1.0 } else { -1.0 };
        let evaluation = evaluate(&sim);

        let collapse_bonus = if collapsed {
            sign * self.config.collapse_bonus
        } else {
            0.0
        };

        let hot = sim.config.capacity.saturating_sub(1);
        let hot_neighbors = sim
            .board
            .neighbors(pos)
            .filter(|&n| {
                let cell = sim.board.cell(n);
                cell.particles == hot && cell.owner != Some(player)
            })
            .count();
        let hot_neighbor_penalty = -sign * self.config.hot_neighbor_penalty * hot_neighbors as f64;

        let center_bias = -self.config.center_weight * pos.manhattan(state.config.center()) as f64;

        Ok(MoveScore {
            pos,
            evaluation,
            collapse_bonus,
            hot_neighbor_penalty,
            center_bias,
            total: evaluation + collapse_bonus + hot_neighbor_penalty + center_bias,
        })
    }

    /// Scores for every legal move, in row-major order
    pub fn score_moves(&self, state: &GameState, player: PlayerIdx) -> Vec<MoveScore> {
        // Legal moves are on the board, so scoring them cannot fail.
        legal_moves(state)
            .into_iter()
            .filter_map(|pos| self.score_move(state, pos, player).ok())
            .collect()
    }

    /// Best move for `player`: highest total for player 0, lowest for player 1.
    /// Ties keep the earliest move in row-major order.
    ///
    /// Returns None only when no cell has room.
    pub fn best_move(&self, state: &GameState, player: PlayerIdx) -> Option<MoveScore> {
        let mut best: Option<MoveScore> = None;
        for score in self.score_moves(state, player) {
            let better = match best {
                None => true,
                Some(b) if player == 0 => score.total > b.total,
                Some(b) => score.total < b.total,
            };
            if better {
                best = Some(score);
            }
        }

        if let Some(b) = &best {
            debug!(
                "greedy player {player} picks {:?} (total {:.2}, eval {:.2})",
                b.pos, b.total, b.evaluation
            );
        }
        best
    }
}

impl Agent for GreedyAgent {
    fn select_move(&mut self, state: &GameState, player: PlayerIdx, _rng: &mut impl Rng) -> Option<Pos> {
        self.best_move(state, player).map(|s| s.pos)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
