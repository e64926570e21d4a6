//! Fixed-size grid of cells owning every stone in play.
//!
//! Coordinates are 1-indexed: `x` is the column, `y` the row counted from the
//! top. Internally cells are stored row-major and addressed by [`Identifier`].

use std::fmt;

use crate::constants::EMPTY_MARKER;
use crate::error::IllegalMove;
use crate::stone::{Color, GroupId, Identifier, Point, Stone};

#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// `size` must be non-zero; [`Game`](crate::game::Game) checks it through
    /// [`GameConfig::validate`](crate::game::GameConfig::validate).
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn on_board(&self, x: usize, y: usize) -> bool {
        (1..=self.size).contains(&x) && (1..=self.size).contains(&y)
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), IllegalMove> {
        if self.on_board(x, y) {
            Ok(())
        } else {
            Err(IllegalMove::OutOfBounds {
                x,
                y,
                size: self.size,
            })
        }
    }

    /// Arena index of an in-bounds coordinate.
    pub fn identifier_for(&self, x: usize, y: usize) -> Identifier {
        (y - 1) * self.size + (x - 1)
    }

    pub fn coordinates_for(&self, id: Identifier) -> Point {
        (id % self.size + 1, id / self.size + 1)
    }

    /// The stone at `(x, y)`, `None` for an empty point.
    pub fn get(&self, x: usize, y: usize) -> Result<Option<&Stone>, IllegalMove> {
        self.check_bounds(x, y)?;
        Ok(self.cells[self.identifier_for(x, y)].as_ref())
    }

    pub fn color_at(&self, x: usize, y: usize) -> Result<Option<Color>, IllegalMove> {
        Ok(self.get(x, y)?.map(|stone| stone.color))
    }

    pub fn stone(&self, id: Identifier) -> Option<&Stone> {
        self.cells.get(id).and_then(Option::as_ref)
    }

    pub fn is_empty_at(&self, id: Identifier) -> bool {
        self.stone(id).is_none()
    }

    /// Places a stone without any rule checks. The target must be empty.
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<Identifier, IllegalMove> {
        self.check_bounds(x, y)?;
        let id = self.identifier_for(x, y);
        debug_assert!(self.cells[id].is_none(), "set on occupied cell ({x}, {y})");
        self.cells[id] = Some(Stone::new(x, y, color));
        Ok(id)
    }

    pub(crate) fn remove(&mut self, id: Identifier) -> Option<Stone> {
        self.cells[id].take()
    }

    pub(crate) fn assign_group(&mut self, id: Identifier, group: Option<GroupId>) {
        if let Some(stone) = self.cells[id].as_mut() {
            stone.group = group;
        }
    }

    pub(crate) fn record_captures(&mut self, id: Identifier, captured: &[Identifier]) {
        if let Some(stone) = self.cells[id].as_mut() {
            stone.captures.extend_from_slice(captured);
        }
    }

    /// Up to four orthogonally adjacent in-bounds coordinates.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<Point> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 1 {
            v.push((x - 1, y));
        }
        if x < s {
            v.push((x + 1, y));
        }
        if y > 1 {
            v.push((x, y - 1));
        }
        if y < s {
            v.push((x, y + 1));
        }
        v
    }

    pub fn neighbor_ids(&self, id: Identifier) -> Vec<Identifier> {
        let (x, y) = self.coordinates_for(id);
        self.neighbors(x, y)
            .into_iter()
            .map(|(nx, ny)| self.identifier_for(nx, ny))
            .collect()
    }

    /// A copy whose stones are fresh values with no group assigned.
    ///
    /// The caller rebuilds group handles for the copy.
    pub fn duplicate(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                cell.as_ref().map(|stone| {
                    let mut copy = Stone::new(stone.x, stone.y, stone.color);
                    copy.captures = stone.captures.clone();
                    copy
                })
            })
            .collect();
        Self {
            size: self.size,
            cells,
        }
    }

    /// All points in row-major order with their stone, if any.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Option<&Stone>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(id, cell)| (self.coordinates_for(id), cell.as_ref()))
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.iter()
            .filter(|(_, stone)| stone.is_none())
            .map(|(point, _)| point)
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let ch = match cell {
                    Some(stone) => stone.color.marker(),
                    None => EMPTY_MARKER,
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
