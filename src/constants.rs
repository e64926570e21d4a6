//! Constants for board geometry, diagram markers and search parameters.
//!
//! Runtime knobs live in [`GameConfig`](crate::game::GameConfig) and
//! [`SearchConfig`](crate::mcts::SearchConfig); the values here are their defaults.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_SIZE: usize = 19;

/// A game is cut off after `size * size * MAX_GAME_LEN_FACTOR` moves.
///
/// Without ko history random play can cycle forever, so this caps rollouts.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Scoring
// =============================================================================

/// Compensation points for White.
pub const DEFAULT_KOMI: f64 = 6.5;

// =============================================================================
// Diagram Markers
// =============================================================================

/// Black stone.
pub const BLACK_MARKER: char = 'X';

/// White stone.
pub const WHITE_MARKER: char = 'O';

/// Empty point.
pub const EMPTY_MARKER: char = '-';

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Exploration constant `C` in the UCT formula.
pub const UCT_BIAS_FACTOR: f64 = 2.0;

/// Default number of playouts per search.
pub const DEFAULT_PLAYOUTS: usize = 1000;
