//! Head-to-head matches between two agents

use log::{debug, warn};
use rand::Rng;
use serde::Serialize;

use quantum_squares_engine::{new_game, outcome, place, ConfigError, GameConfig, Outcome, NUM_PLAYERS};

use crate::Agent;

/// Hard stop for a single game; a game that hits it is reported unfinished
pub const DEFAULT_MAX_MOVES: u32 = 1_000;

/// Result of one game
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    /// None if the move limit was reached before the game ended
    pub outcome: Option<Outcome>,
    pub scores: [i32; NUM_PLAYERS],
    pub moves: u32,
    pub collapses: u32,
}

/// Play one game: `red` moves as player 0, `blue` as player 1.
pub fn play_match<A: Agent, B: Agent>(
    config: GameConfig,
    red: &mut A,
    blue: &mut B,
    max_moves: u32,
    rng: &mut impl Rng,
) -> Result<MatchResult, ConfigError> {
    let mut state = new_game(config)?;
    let mut moves = 0u32;
    let mut collapses = 0u32;

    while !state.game_over && moves < max_moves {
        let player = state.current_player;
        let choice = if player == 0 {
            red.select_move(&state, player, rng)
        } else {
            blue.select_move(&state, player, rng)
        };

        let Some(pos) = choice else {
            debug!("player {player} has no legal move; stopping");
            break;
        };

        match place(&mut state, pos.row as isize, pos.col as isize) {
            Ok(out) => collapses += out.collapses,
            Err(e) => {
                warn!("player {player} proposed {pos:?}: {e}");
                break;
            }
        }
        moves += 1;
    }

    Ok(MatchResult {
        outcome: outcome(&state),
        scores: state.scores,
        moves,
        collapses,
    })
}

/// Win/tie tally over a series of games, indexed by seat
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ArenaSummary {
    pub games: u32,
    pub wins: [u32; NUM_PLAYERS],
    pub ties: u32,
    pub unfinished: u32,
    pub total_moves: u64,
}

impl ArenaSummary {
    pub fn record(&mut self, result: &MatchResult) {
        self.games += 1;
        self.total_moves += result.moves as u64;
        match result.outcome {
            Some(Outcome::Winner(p)) => self.wins[p as usize] += 1,
            Some(Outcome::Tie) => self.ties += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn win_rate(&self, player: usize) -> f64 {
        self.wins[player] as f64 / self.games.max(1) as f64
    }

    pub fn mean_moves(&self) -> f64 {
        self.total_moves as f64 / self.games.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreedyAgent, RandomAgent};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_greedy_vs_random_completes() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut summary = ArenaSummary::default();

        for _ in 0..5 {
            let result = play_match(
                GameConfig::default(),
                &mut GreedyAgent::new(),
                &mut RandomAgent::new(),
                DEFAULT_MAX_MOVES,
                &mut rng,
            )
            .unwrap();
            assert!(result.moves <= DEFAULT_MAX_MOVES);
            if let Some(Outcome::Winner(p)) = result.outcome {
                assert!(result.scores[p as usize] > result.scores[1 - p as usize]);
            }
            summary.record(&result);
        }

        assert_eq!(summary.games, 5);
        assert_eq!(summary.wins[0] + summary.wins[1] + summary.ties + summary.unfinished, 5);
    }

    #[test]
    fn test_move_limit_leaves_game_unfinished() {
        let mut rng = StdRng::seed_from_u64(9);
        let result = play_match(
            GameConfig::default(),
            &mut RandomAgent::new(),
            &mut RandomAgent::new(),
            3,
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.moves, 3);
        assert_eq!(result.outcome, None);
    }

    #[test]
    fn test_greedy_self_play_is_deterministic() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            play_match(
                GameConfig::default(),
                &mut GreedyAgent::new(),
                &mut GreedyAgent::new(),
                200,
                &mut rng,
            )
            .unwrap()
        };
        assert_eq!(run(1), run(2), "Greedy play never consults the rng");
    }

    #[test]
    fn test_bad_config_is_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GameConfig {
            board_size: 0,
            ..Default::default()
        };
        let err = play_match(config, &mut RandomAgent::new(), &mut RandomAgent::new(), 10, &mut rng);
        assert_eq!(err, Err(ConfigError::ZeroBoardSize));
    }

    #[test]
    fn test_summary_rates() {
        let mut summary = ArenaSummary::default();
        let base = MatchResult {
            outcome: Some(Outcome::Winner(0)),
            scores: [10, 4],
            moves: 30,
            collapses: 12,
        };
        summary.record(&base);
        summary.record(&MatchResult {
            outcome: Some(Outcome::Tie),
            moves: 10,
            ..base.clone()
        });
        assert_eq!(summary.wins, [1, 0]);
        assert_eq!(summary.ties, 1);
        assert!((summary.win_rate(0) - 0.5).abs() < 1e-12);
        assert!((summary.mean_moves() - 20.0).abs() < 1e-12);
    }
}
