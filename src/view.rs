//! Read-only snapshot of a game for presentation layers
//!
//! Everything a renderer needs (cells, scores, turn, terminal flag and the
//! particle movements of the last placement) in a flat, serializable form.

use serde::Serialize;

use quantum_squares_engine::{outcome, GameState, Outcome, ParticleMove, PlaceOutcome, PlayerIdx, NUM_PLAYERS};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub particles: u8,
    pub owner: Option<PlayerIdx>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameView {
    pub board_size: usize,
    pub capacity: u8,
    pub win_threshold: i32,
    pub cells: Vec<CellView>,
    pub scores: [i32; NUM_PLAYERS],
    pub current_player: PlayerIdx,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
    /// Particle movements from the most recent placement, if any
    pub last_moves: Vec<ParticleMove>,
}

impl GameView {
    pub fn new(state: &GameState, last: Option<&PlaceOutcome>) -> Self {
        let cells = state
            .board
            .iter()
            .map(|(pos, cell)| CellView {
                row: pos.row,
                col: pos.col,
                particles: cell.particles,
                owner: cell.owner,
            })
            .collect();

        GameView {
            board_size: state.config.board_size,
            capacity: state.config.capacity,
            win_threshold: state.config.win_threshold,
            cells,
            scores: state.scores,
            current_player: state.current_player,
            game_over: state.game_over,
            outcome: outcome(state),
            last_moves: last.map(|o| o.events.clone()).unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_squares_engine::{place, Cell, Pos};

    #[test]
    fn test_view_mirrors_state() {
        let mut state = GameState::default();
        *state.board.cell_mut(Pos::new(2, 2)) = Cell {
            particles: 3,
            owner: Some(0),
        };
        let out = place(&mut state, 2, 2).unwrap();

        let view = GameView::new(&state, Some(&out));
        assert_eq!(view.cells.len(), 25);
        assert_eq!(view.scores, [1, 0]);
        assert_eq!(view.current_player, 1);
        assert_eq!(view.last_moves.len(), 4);

        let centre = &view.cells[2 * 5 + 2];
        assert_eq!((centre.row, centre.col, centre.particles, centre.owner), (2, 2, 0, None));
        let above = &view.cells[5 + 2];
        assert_eq!((above.particles, above.owner), (1, Some(0)));
    }

    #[test]
    fn test_view_json_shape() {
        let mut state = GameState::default();
        state.scores = [10, 2];
        state.game_over = true;

        let json = GameView::new(&state, None).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["board_size"], 5);
        assert_eq!(value["game_over"], true);
        assert_eq!(value["outcome"]["kind"], "winner");
        assert_eq!(value["outcome"]["player"], 0);
        assert_eq!(value["cells"][0]["owner"], serde_json::Value::Null);
        assert_eq!(value["last_moves"].as_array().map(Vec::len), Some(0));
    }
}
