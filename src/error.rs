//! Error types surfaced by the rule engine, the diagram reader and the search.

use thiserror::Error;

use crate::stone::Color;

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    #[error("({x}, {y}) is already occupied")]
    OccupiedCell { x: usize, y: usize },

    #[error("playing at ({x}, {y}) would be suicide")]
    SuicideMove { x: usize, y: usize },

    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Color, got: Color },

    #[error("the game is already finished")]
    GameFinished,
}

/// A game configuration that cannot describe a playable board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1, got {size}")]
    InvalidSize { size: usize },
}

/// Failure to build a game from a textual diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("diagram is empty")]
    Empty,

    #[error("row {row} has {len} columns, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("unknown marker {marker:?} at ({x}, {y})")]
    UnknownMarker { marker: char, x: usize, y: usize },

    #[error("replaying diagram: {0}")]
    Illegal(#[from] IllegalMove),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while searching.
///
/// The UCT variants are programming errors: a correct search loop visits every
/// node before comparing it.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("UCT evaluated on node {node} before its first visit")]
    UnvisitedNode { node: usize },

    #[error("UCT evaluated on the root node")]
    RootNode,

    #[error("game state rejected a move")]
    Game(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    pub(crate) fn game<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SearchError::Game(Box::new(err))
    }
}
