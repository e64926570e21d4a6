//! Simple area scoring for finished games.
//!
//! Stones on the board count for their owner, and an empty point counts for a
//! color when every neighbor is a stone of that color. Dead stones and larger
//! territories are not recognised.

use crate::board::Board;
use crate::stone::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub black: f64,
    pub white: f64,
}

impl Score {
    /// Black must be strictly ahead; ties go to White.
    pub fn winner(&self) -> Color {
        if self.black > self.white {
            Color::Black
        } else {
            Color::White
        }
    }
}

/// The color surrounding an empty point, if all its neighbors share one.
pub fn is_eyeish(board: &Board, x: usize, y: usize) -> Option<Color> {
    let mut eye_color = None;
    for (nx, ny) in board.neighbors(x, y) {
        let color = board.color_at(nx, ny).ok()??;
        match eye_color {
            None => eye_color = Some(color),
            Some(c) if c != color => return None,
            Some(_) => {}
        }
    }
    eye_color
}

/// Area score with komi credited to White and the handicap to Black.
pub fn score(board: &Board, komi: f64, handicap: u32) -> Score {
    let mut s = Score {
        black: f64::from(handicap),
        white: komi,
    };
    for ((x, y), stone) in board.iter() {
        let owner = match stone {
            Some(stone) => Some(stone.color),
            None => is_eyeish(board, x, y),
        };
        match owner {
            Some(Color::Black) => s.black += 1.0,
            Some(Color::White) => s.white += 1.0,
            None => {}
        }
    }
    s
}
