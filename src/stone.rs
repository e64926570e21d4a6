//! Stone colors, stones on the board and moves.

use std::fmt;
use std::ops::Neg;

use crate::constants::{BLACK_MARKER, WHITE_MARKER};

/// Index of a board point in the board arena (see [`Board::identifier_for`]).
///
/// [`Board::identifier_for`]: crate::board::Board::identifier_for
pub type Identifier = usize;

/// Handle to a group owned by the [`GroupOverseer`](crate::group::GroupOverseer).
pub type GroupId = usize;

/// A 1-indexed `(x, y)` coordinate.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Color::Black => BLACK_MARKER,
            Color::White => WHITE_MARKER,
        }
    }

    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            BLACK_MARKER => Some(Color::Black),
            WHITE_MARKER => Some(Color::White),
            _ => None,
        }
    }
}

impl Neg for Color {
    type Output = Self;

    fn neg(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A stone sitting on the board.
///
/// `group` is a non-owning handle; only the group overseer changes it.
#[derive(Clone, Debug)]
pub struct Stone {
    pub x: usize,
    pub y: usize,
    pub color: Color,
    pub(crate) group: Option<GroupId>,
    pub(crate) captures: Vec<Identifier>,
}

impl Stone {
    pub(crate) fn new(x: usize, y: usize, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            group: None,
            captures: Vec::new(),
        }
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Identifiers of the stones this stone captured when it was placed.
    pub fn captures(&self) -> &[Identifier] {
        &self.captures
    }

    pub fn enemy_color(&self) -> Color {
        self.color.opponent()
    }
}

impl PartialEq for Stone {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.color == other.color
    }
}

impl Eq for Stone {}

/// A move: a placement at `(x, y)` or a pass, both scoped to one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play { x: usize, y: usize, color: Color },
    Pass { color: Color },
}

impl Move {
    pub fn color(&self) -> Color {
        match *self {
            Move::Play { color, .. } | Move::Pass { color } => color,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass { .. })
    }

    pub fn point(&self) -> Option<Point> {
        match *self {
            Move::Play { x, y, .. } => Some((x, y)),
            Move::Pass { .. } => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play { x, y, color } => write!(f, "{color} ({x}, {y})"),
            Move::Pass { color } => write!(f, "{color} pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(-Color::White, Color::Black);
    }

    #[test]
    fn markers() {
        assert_eq!(Color::from_marker('X'), Some(Color::Black));
        assert_eq!(Color::from_marker('O'), Some(Color::White));
        assert_eq!(Color::from_marker('-'), None);
        assert_eq!(Color::White.marker(), 'O');
    }

    #[test]
    fn stone_equality_ignores_group() {
        let mut a = Stone::new(3, 4, Color::Black);
        let b = Stone::new(3, 4, Color::Black);
        a.group = Some(7);
        assert_eq!(a, b);
        assert_ne!(a, Stone::new(3, 4, Color::White));
    }

    #[test]
    fn pass_has_no_point() {
        let pass = Move::Pass { color: Color::White };
        assert!(pass.is_pass());
        assert_eq!(pass.point(), None);
        assert_eq!(pass.color(), Color::White);
        assert_eq!(pass.to_string(), "white pass");
    }
}
