//! The capability set a game must expose to be searched.

use std::fmt::Debug;

use fastrand::Rng;

use crate::stone::Color;

/// A finite two-outcome game the search can drive.
///
/// The search depends only on this trait. Implementations must keep
/// [`dup`](GameState::dup) deep: mutating a copy never affects the original.
pub trait GameState: Sized {
    type Move: Clone + PartialEq + Debug;
    /// Why [`set_move`](GameState::set_move) refused a move.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Moves that may be played from this position. Empty once finished.
    fn all_valid_moves(&self) -> Vec<Self::Move>;

    /// Applies a move for the color to move and advances the turn.
    fn set_move(&mut self, mv: Self::Move) -> Result<(), Self::Error>;

    fn finished(&self) -> bool;

    /// Whether Black won. Only meaningful once [`finished`](GameState::finished).
    fn won(&self) -> bool;

    fn next_turn_color(&self) -> Color;

    /// A pseudo-random legal move. Only called while the game is not finished.
    fn generate_move(&self, rng: &mut Rng) -> Self::Move;

    fn dup(&self) -> Self;
}
