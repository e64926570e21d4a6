//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays pseudo-random legal moves until the game ends, then reports
//! the outcome.

use fastrand::Rng;

use crate::game_state::GameState;

/// Plays `state` out to a terminal position.
///
/// Returns `true` when Black won. A rejected move means the game broke the
/// [`GameState::generate_move`] contract.
pub fn playout<S: GameState>(state: &mut S, rng: &mut Rng) -> Result<bool, S::Error> {
    while !state.finished() {
        let mv = state.generate_move(rng);
        state.set_move(mv)?;
    }
    Ok(state.won())
}
