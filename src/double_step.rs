//! A toy race game for exercising the search against trivial rules.
//!
//! Black and White take turns advancing 1 or 2 fields. The first to reach
//! [`FINAL_POSITION`] ends the game.

use fastrand::Rng;
use thiserror::Error;

use crate::game_state::GameState;
use crate::stone::Color;

pub const FINAL_POSITION: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DoubleStepError {
    #[error("a player advances 1 or 2 fields, not {steps}")]
    InvalidStep { steps: u32 },

    #[error("the race is already over")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleStep {
    black: u32,
    white: u32,
    current: Color,
}

impl Default for DoubleStep {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleStep {
    pub fn new() -> Self {
        Self::with_positions(0, 0)
    }

    /// Starts from the given fields; a head start acts as a handicap.
    pub fn with_positions(black: u32, white: u32) -> Self {
        Self {
            black,
            white,
            current: Color::Black,
        }
    }

    pub fn position(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

impl GameState for DoubleStep {
    type Move = u32;
    type Error = DoubleStepError;

    fn all_valid_moves(&self) -> Vec<u32> {
        if self.finished() {
            Vec::new()
        } else {
            vec![1, 2]
        }
    }

    fn set_move(&mut self, steps: u32) -> Result<(), DoubleStepError> {
        if self.finished() {
            return Err(DoubleStepError::Finished);
        }
        if !(1..=2).contains(&steps) {
            return Err(DoubleStepError::InvalidStep { steps });
        }
        match self.current {
            Color::Black => self.black += steps,
            Color::White => self.white += steps,
        }
        self.current = self.current.opponent();
        Ok(())
    }

    fn finished(&self) -> bool {
        self.black >= FINAL_POSITION || self.white >= FINAL_POSITION
    }

    fn won(&self) -> bool {
        self.black >= FINAL_POSITION
    }

    fn next_turn_color(&self) -> Color {
        self.current
    }

    fn generate_move(&self, rng: &mut Rng) -> u32 {
        rng.u32(1..=2)
    }

    fn dup(&self) -> Self {
        self.clone()
    }
}
