//! Agent API for move selection

use rand::Rng;

use quantum_squares_engine::{legal_moves, GameState, PlayerIdx, Pos};

/// Trait for anything that can choose moves:
/// random policy, heuristic search, or human input.
pub trait Agent {
    /// Choose a move for `player` in `state`.
    ///
    /// Requirement:
    /// - Must only return positions contained in `legal_moves(state)`.
    /// - Returns None when there is no legal move; callers treat that as game over.
    /// - Must not mutate the caller's state (it only gets a shared reference).
    fn select_move(&mut self, state: &GameState, player: PlayerIdx, rng: &mut impl Rng) -> Option<Pos>;

    /// Short label for logs and tallies
    fn name(&self) -> &str;
}

/// Random agent that uniformly samples from legal moves
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState, _player: PlayerIdx, rng: &mut impl Rng) -> Option<Pos> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..moves.len() as u32) as usize;
        Some(moves[idx])
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_squares_engine::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let state = GameState::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut agent = RandomAgent::new();

        let legal = legal_moves(&state);
        for _ in 0..100 {
            let pos = agent.select_move(&state, 0, &mut rng).unwrap();
            assert!(legal.contains(&pos), "Random agent should select legal move");
        }
    }

    #[test]
    fn test_random_agent_skips_full_cells() {
        let mut state = GameState::default();
        for pos in state.board.positions().collect::<Vec<_>>() {
            if pos != Pos::new(3, 1) {
                *state.board.cell_mut(pos) = Cell {
                    particles: 4,
                    owner: Some(1),
                };
            }
        }
        let mut rng = StdRng::seed_from_u64(7);
        let mut agent = RandomAgent::new();
        for _ in 0..20 {
            assert_eq!(agent.select_move(&state, 1, &mut rng), Some(Pos::new(3, 1)));
        }
    }

    #[test]
    fn test_random_agent_none_on_saturated_board() {
        let mut state = GameState::default();
        for pos in state.board.positions().collect::<Vec<_>>() {
            *state.board.cell_mut(pos) = Cell {
                particles: 4,
                owner: Some(0),
            };
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(RandomAgent::new().select_move(&state, 0, &mut rng), None);
    }
}
