//! Quantum Squares Game Engine
//!
//! State engine for Quantum Squares, a two-player chain-reaction territory game.
//! Core object is a single `GameState` (plain data). Placement, collapse,
//! terminal detection and evaluation are free functions operating on it.

use std::collections::VecDeque;

use log::{debug, trace};
use serde::Serialize;

// =============================================================================
// Basic types and constants
// =============================================================================

/// Index into the two-player score table: 0 (Red) or 1 (Blue)
pub type PlayerIdx = u8;

pub const NUM_PLAYERS: usize = 2;
pub const DEFAULT_BOARD_SIZE: usize = 5;
pub const DEFAULT_WIN_THRESHOLD: i32 = 10;
pub const DEFAULT_CAPACITY: u8 = 4;

/// Orthogonal neighbour offsets in propagation order: up, down, left, right
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The other player
#[inline]
pub fn opponent(player: PlayerIdx) -> PlayerIdx {
    1 - player
}

/// A cell coordinate known to be on the board
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Fixed parameters of a game
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Ledger score that ends the game
    pub win_threshold: i32,
    /// Particles a cell holds before it collapses
    pub capacity: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    ZeroBoardSize,
    /// A collapse hands out one particle per neighbour; a smaller capacity
    /// lets particles multiply and the cascade never settles.
    #[error("cell capacity {0} is below the neighbour count {n}", n = NEIGHBOR_OFFSETS.len())]
    CapacityTooSmall(u8),
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if (self.capacity as usize) < NEIGHBOR_OFFSETS.len() {
            return Err(ConfigError::CapacityTooSmall(self.capacity));
        }
        Ok(())
    }

    /// Centre cell (rounded down on even boards)
    pub fn center(&self) -> Pos {
        let c = self.board_size / 2;
        Pos::new(c, c)
    }
}

// =============================================================================
// Cell and Board
// =============================================================================

/// One grid position: particle count plus the player who holds it.
///
/// `owner` is `Some` exactly when `particles > 0`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Cell {
    pub particles: u8,
    pub owner: Option<PlayerIdx>,
}

impl Cell {
    /// Add one particle for `player`, taking ownership unconditionally.
    /// Returns true iff the new count equals `capacity`.
    pub fn add_particle(&mut self, player: PlayerIdx, capacity: u8) -> bool {
        self.particles = self.particles.saturating_add(1);
        self.owner = Some(player);
        self.particles == capacity
    }

    pub fn reset(&mut self) {
        *self = Cell::default();
    }

    pub fn is_empty(&self) -> bool {
        self.particles == 0
    }
}

/// Square grid of cells, stored row-major
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Convert signed coordinates to a position, or None if off the board
    pub fn pos_at(&self, row: isize, col: isize) -> Option<Pos> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.size && col < self.size).then_some(Pos::new(row, col))
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[pos.row * self.size + pos.col]
    }

    /// Direct cell access for building positions. Play goes through [`place`].
    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.row * self.size + pos.col]
    }

    /// In-bounds orthogonal neighbours of `pos`, in propagation order
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        let size = self.size as isize;
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let (r, c) = (pos.row as isize + dr, pos.col as isize + dc);
            (r >= 0 && r < size && c >= 0 && c < size).then(|| Pos::new(r as usize, c as usize))
        })
    }

    /// All positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Pos::new(row, col)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// True when every cell holds at least `capacity` particles
    pub fn is_saturated(&self, capacity: u8) -> bool {
        self.cells.iter().all(|cell| cell.particles >= capacity)
    }
}

// =============================================================================
// GameState
// =============================================================================

/// Complete game state. `Clone` is a full deep copy, which is what move
/// search simulates on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    /// Capture ledger: moves only on collapse events, never recomputed
    /// from live ownership.
    pub scores: [i32; NUM_PLAYERS],
    pub current_player: PlayerIdx,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        let config = GameConfig::default();
        GameState {
            config,
            board: Board::new(config.board_size),
            scores: [0; NUM_PLAYERS],
            current_player: 0,
            game_over: false,
        }
    }
}

/// Final result of a finished game
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "snake_case")]
pub enum Outcome {
    Winner(PlayerIdx),
    Tie,
}

/// Rejected placement. No state is touched when this is returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidMove {
    #[error("the game is already over")]
    GameOver,
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: isize, col: isize },
}

/// One particle travelling between cells, for presentation layers to animate.
///
/// `owner` is the colour to draw: the destination's previous owner if it had
/// one, else the player who moved. A placement that did not collapse records
/// a single stationary move (`from == to`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ParticleMove {
    pub from: Pos,
    pub to: Pos,
    pub owner: PlayerIdx,
}

/// What a successful [`place`] did
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlaceOutcome {
    pub pos: Pos,
    pub player: PlayerIdx,
    /// Number of cells that collapsed, including the placed one
    pub collapses: u32,
    pub events: Vec<ParticleMove>,
}

impl PlaceOutcome {
    /// True iff the placed cell itself reached capacity
    pub fn collapsed(&self) -> bool {
        self.collapses > 0
    }
}

/// Start a game on an empty board with player 0 to move
pub fn new_game(config: GameConfig) -> Result<GameState, ConfigError> {
    config.validate()?;
    Ok(GameState {
        config,
        board: Board::new(config.board_size),
        scores: [0; NUM_PLAYERS],
        current_player: 0,
        game_over: false,
    })
}

/// Cells still below capacity, row-major
pub fn legal_moves(state: &GameState) -> Vec<Pos> {
    let capacity = state.config.capacity;
    state
        .board
        .iter()
        .filter(|(_, cell)| cell.particles < capacity)
        .map(|(pos, _)| pos)
        .collect()
}

// =============================================================================
// Placement and cascading collapse
// =============================================================================

/// Place a particle for the current player at `(row, col)`.
///
/// A cell that reaches capacity collapses and the cascade runs to completion
/// before this returns. Afterwards the game-over condition is checked and the
/// turn passes unless the game just ended.
pub fn place(state: &mut GameState, row: isize, col: isize) -> Result<PlaceOutcome, InvalidMove> {
    if state.game_over {
        return Err(InvalidMove::GameOver);
    }
    let pos = state
        .board
        .pos_at(row, col)
        .ok_or(InvalidMove::OutOfBounds { row, col })?;

    let player = state.current_player;
    let mut outcome = PlaceOutcome {
        pos,
        player,
        collapses: 0,
        events: Vec::new(),
    };

    if state
        .board
        .cell_mut(pos)
        .add_particle(player, state.config.capacity)
    {
        state.scores[player as usize] += 1;
        collapse(state, pos, &mut outcome);
    } else {
        outcome.events.push(ParticleMove {
            from: pos,
            to: pos,
            owner: player,
        });
    }

    check_game_over(state);
    if !state.game_over {
        state.current_player = opponent(player);
    }
    Ok(outcome)
}

/// Breadth-first collapse starting from a cell that just reached capacity.
///
/// Every particle moved is credited to the current player. A neighbour that
/// already had an owner keeps it; a neighbour that collapses moves one point
/// of ledger score from its old owner to the current player.
fn collapse(state: &mut GameState, origin: Pos, outcome: &mut PlaceOutcome) {
    let player = state.current_player;
    let capacity = state.config.capacity;
    let scores_before = state.scores;

    let mut queue = VecDeque::from([origin]);
    while let Some(pos) = queue.pop_front() {
        state.board.cell_mut(pos).reset();
        outcome.collapses += 1;

        for next in state.board.neighbors(pos) {
            let cell = state.board.cell_mut(next);
            let old_owner = cell.owner;

            if cell.add_particle(player, capacity) {
                if let Some(prev) = old_owner.filter(|&o| o != player) {
                    state.scores[prev as usize] -= 1;
                }
                state.scores[player as usize] += 1;
                queue.push_back(next);
            }

            if old_owner.is_some() {
                cell.owner = old_owner;
            }

            let owner = old_owner.unwrap_or(player);
            trace!("particle {pos:?} -> {next:?} (colour {owner})");
            outcome.events.push(ParticleMove {
                from: pos,
                to: next,
                owner,
            });
        }
    }

    debug!(
        "player {player} collapse at {origin:?}: {} cells, scores {scores_before:?} -> {:?}",
        outcome.collapses, state.scores
    );
}

/// Mark the game over once a ledger score reaches the threshold or no cell
/// has room left.
pub fn check_game_over(state: &mut GameState) {
    let top = state.scores.iter().copied().max().unwrap_or(0);
    if top >= state.config.win_threshold || state.board.is_saturated(state.config.capacity) {
        state.game_over = true;
    }
}

/// Winner by ledger score, or None while the game is still running
pub fn outcome(state: &GameState) -> Option<Outcome> {
    if !state.game_over {
        return None;
    }
    let [red, blue] = state.scores;
    Some(match red.cmp(&blue) {
        std::cmp::Ordering::Greater => Outcome::Winner(0),
        std::cmp::Ordering::Less => Outcome::Winner(1),
        std::cmp::Ordering::Equal => Outcome::Tie,
    })
}

// =============================================================================
// Evaluation
// =============================================================================

/// Particles on cells owned by each player
pub fn particle_totals(state: &GameState) -> [u32; NUM_PLAYERS] {
    let mut totals = [0u32; NUM_PLAYERS];
    for (_, cell) in state.board.iter() {
        if let Some(owner) = cell.owner {
            totals[owner as usize] += cell.particles as u32;
        }
    }
    totals
}

/// Static evaluation: positive favours player 0, negative favours player 1.
///
/// Ledger difference plus a tenth of a point per owned particle.
pub fn evaluate(state: &GameState) -> f64 {
    let [red, blue] = particle_totals(state);
    (state.scores[0] - state.scores[1]) as f64 + 0.1 * red as f64 - 0.1 * blue as f64
}

// =============================================================================
// Debug assertions for invariants
// =============================================================================

pub fn assert_state_invariants(state: &GameState) {
    let capacity = state.config.capacity;
    assert_eq!(state.board.size(), state.config.board_size, "Board size mismatch");
    assert!(
        (state.current_player as usize) < NUM_PLAYERS,
        "Invalid current player {}",
        state.current_player
    );
    for (pos, cell) in state.board.iter() {
        assert!(
            cell.particles <= capacity,
            "Cell {pos:?} holds {} particles, capacity {capacity}",
            cell.particles
        );
        assert_eq!(
            cell.owner.is_some(),
            cell.particles > 0,
            "Cell {pos:?} ownership does not match particle count: {cell:?}"
        );
    }
}
