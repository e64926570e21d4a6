//! Connected groups of stones and the overseer that keeps them consistent.
//!
//! Groups hold board identifiers, never stones. A stone points back at its group
//! through a [`GroupId`] handle, so a board and its overseer can be copied
//! together and rewired without any cross-copy aliasing.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::board::Board;
use crate::error::IllegalMove;
use crate::stone::{Color, GroupId, Identifier};

/// A maximal connected set of same-colored stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    color: Color,
    stones: BTreeSet<Identifier>,
    liberties: BTreeSet<Identifier>,
}

impl Group {
    fn new(id: GroupId, color: Color) -> Self {
        Self {
            id,
            color,
            stones: BTreeSet::new(),
            liberties: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stones(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.stones.iter().copied()
    }

    pub fn size(&self) -> usize {
        self.stones.len()
    }

    /// Identifiers of the empty points adjacent to the group.
    pub fn liberties(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.liberties.iter().copied()
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn has_liberty(&self, id: Identifier) -> bool {
        self.liberties.contains(&id)
    }
}

/// Owns all groups of one game and the prisoner tally.
///
/// It is the only code that changes group membership, liberties, or the group
/// handles stored on stones.
#[derive(Clone, Debug, Default)]
pub struct GroupOverseer {
    groups: BTreeMap<GroupId, Group>,
    next_id: GroupId,
    black_prisoners: usize,
    white_prisoners: usize,
}

impl GroupOverseer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_at(&self, board: &Board, x: usize, y: usize) -> Option<&Group> {
        let stone = board.get(x, y).ok()??;
        self.group(stone.group()?)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.values()
    }

    /// Number of stones `color` has captured.
    pub fn prisoners(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_prisoners,
            Color::White => self.white_prisoners,
        }
    }

    fn prisoners_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Black => &mut self.black_prisoners,
            Color::White => &mut self.white_prisoners,
        }
    }

    /// Whether placing `color` at the empty point `(x, y)` would leave the new
    /// group without liberties and capture nothing. Off-board points are never
    /// suicide; placing there fails with `OutOfBounds` instead.
    pub(crate) fn would_be_suicide(&self, board: &Board, x: usize, y: usize, color: Color) -> bool {
        if !board.on_board(x, y) {
            return false;
        }
        let id = board.identifier_for(x, y);
        for n in board.neighbor_ids(id) {
            let Some(stone) = board.stone(n) else {
                return false;
            };
            let liberties = stone
                .group()
                .and_then(|g| self.group(g))
                .map_or(0, Group::liberty_count);
            if stone.color == color {
                // `id` is one of them, so another must remain.
                if liberties > 1 {
                    return false;
                }
            } else if liberties == 1 {
                return false;
            }
        }
        true
    }

    /// Places a stone and resolves merges and captures.
    ///
    /// Placement is unconditional: the caller rejects occupied points and
    /// suicide beforehand. Returns the identifiers of captured stones.
    pub fn place(
        &mut self,
        board: &mut Board,
        x: usize,
        y: usize,
        color: Color,
    ) -> Result<Vec<Identifier>, IllegalMove> {
        let id = board.set(x, y, color)?;

        let mut friendly: Vec<GroupId> = Vec::new();
        let mut enemy: Vec<GroupId> = Vec::new();
        for n in board.neighbor_ids(id) {
            let Some(stone) = board.stone(n) else {
                continue;
            };
            let Some(gid) = stone.group() else {
                debug_assert!(false, "stone at {:?} has no group", board.coordinates_for(n));
                continue;
            };
            let seen = if stone.color == color {
                &mut friendly
            } else {
                &mut enemy
            };
            if !seen.contains(&gid) {
                seen.push(gid);
            }
        }

        self.join(board, id, color, &friendly);

        let mut captured = Vec::new();
        for gid in enemy {
            let Some(group) = self.groups.get_mut(&gid) else {
                continue;
            };
            let filled = group.liberties.remove(&id);
            debug_assert!(filled, "enemy group {gid} did not list the filled point");
            if group.liberties.is_empty() {
                captured.extend(self.capture(board, gid, color));
            }
        }

        if !captured.is_empty() {
            board.record_captures(id, &captured);
        }
        trace!(x, y, %color, captured = captured.len(), "placed stone");
        Ok(captured)
    }

    /// Adds the stone at `id` to a group, merging every friendly neighbor group.
    fn join(&mut self, board: &mut Board, id: Identifier, color: Color, friendly: &[GroupId]) {
        let target = friendly
            .iter()
            .copied()
            .max_by_key(|gid| self.groups.get(gid).map_or(0, Group::size));
        let target = match target {
            Some(gid) => gid,
            None => {
                let gid = self.next_id;
                self.next_id += 1;
                self.groups.insert(gid, Group::new(gid, color));
                gid
            }
        };

        let mut absorbed_stones = Vec::new();
        let mut absorbed_liberties = Vec::new();
        for &gid in friendly.iter().filter(|&&gid| gid != target) {
            if let Some(absorbed) = self.groups.remove(&gid) {
                absorbed_stones.extend(absorbed.stones);
                absorbed_liberties.extend(absorbed.liberties);
            }
        }
        for &stone in &absorbed_stones {
            board.assign_group(stone, Some(target));
        }
        board.assign_group(id, Some(target));

        let new_liberties: Vec<Identifier> = board
            .neighbor_ids(id)
            .into_iter()
            .filter(|&n| board.is_empty_at(n))
            .collect();

        if let Some(group) = self.groups.get_mut(&target) {
            group.stones.extend(absorbed_stones);
            group.stones.insert(id);
            group.liberties.extend(absorbed_liberties);
            group.liberties.extend(new_liberties);
            group.liberties.remove(&id);
        }
    }

    /// Removes a group from the board and credits `capturer` with its stones.
    fn capture(&mut self, board: &mut Board, gid: GroupId, capturer: Color) -> Vec<Identifier> {
        let Some(group) = self.groups.remove(&gid) else {
            return Vec::new();
        };
        let stones: Vec<Identifier> = group.stones.into_iter().collect();
        for &stone in &stones {
            board.remove(stone);
        }
        for &stone in &stones {
            for n in board.neighbor_ids(stone) {
                let Some(neighbor) = board.stone(n).and_then(|s| s.group()) else {
                    continue;
                };
                if let Some(neighbor) = self.groups.get_mut(&neighbor) {
                    neighbor.liberties.insert(stone);
                }
            }
        }
        *self.prisoners_mut(capturer) += stones.len();
        trace!(group = gid, stones = stones.len(), %capturer, "captured group");
        stones
    }

    /// A copy of this overseer whose groups are attached to the stones of
    /// `board`, a fresh duplicate of the board this overseer manages.
    pub fn duplicate(&self, board: &mut Board) -> Self {
        let copy = self.clone();
        for group in copy.groups.values() {
            for stone in group.stones() {
                board.assign_group(stone, Some(group.id));
            }
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(stones: &[(usize, usize, Color)]) -> (Board, GroupOverseer) {
        let mut board = Board::new(5);
        let mut overseer = GroupOverseer::new();
        for &(x, y, color) in stones {
            overseer.place(&mut board, x, y, color).unwrap();
        }
        (board, overseer)
    }

    /// Liberties recomputed from scratch for every group.
    fn assert_liberties_consistent(board: &Board, overseer: &GroupOverseer) {
        for group in overseer.groups() {
            let expected: BTreeSet<Identifier> = group
                .stones()
                .flat_map(|s| board.neighbor_ids(s))
                .filter(|&n| board.is_empty_at(n))
                .collect();
            let actual: BTreeSet<Identifier> = group.liberties().collect();
            assert_eq!(actual, expected, "group {}", group.id());
            for stone in group.stones() {
                assert_eq!(board.stone(stone).unwrap().group(), Some(group.id()));
            }
        }
    }

    #[test]
    fn single_stone_liberties() {
        let (board, overseer) = place_all(&[(1, 1, Color::Black), (3, 3, Color::White)]);
        assert_eq!(overseer.group_at(&board, 1, 1).unwrap().liberty_count(), 2);
        assert_eq!(overseer.group_at(&board, 3, 3).unwrap().liberty_count(), 4);
        assert!(overseer.group_at(&board, 2, 2).is_none());
    }

    #[test]
    fn adjacent_stones_merge() {
        let (board, overseer) = place_all(&[
            (1, 1, Color::Black),
            (3, 1, Color::Black),
            (2, 1, Color::Black),
        ]);
        let group = overseer.group_at(&board, 2, 1).unwrap();
        assert_eq!(group.size(), 3);
        assert_eq!(group.liberty_count(), 4);
        assert_eq!(overseer.groups().count(), 1);
        assert_liberties_consistent(&board, &overseer);
    }

    #[test]
    fn enemy_stone_removes_liberty() {
        let (board, overseer) = place_all(&[(2, 2, Color::Black), (2, 3, Color::White)]);
        assert_eq!(overseer.group_at(&board, 2, 2).unwrap().liberty_count(), 3);
        assert_eq!(overseer.group_at(&board, 2, 3).unwrap().liberty_count(), 3);
        assert_liberties_consistent(&board, &overseer);
    }

    #[test]
    fn corner_capture_frees_liberties() {
        let (board, overseer) = place_all(&[
            (1, 1, Color::White),
            (2, 1, Color::Black),
            (1, 2, Color::Black),
        ]);
        assert_eq!(board.get(1, 1), Ok(None));
        assert_eq!(overseer.prisoners(Color::Black), 1);
        assert_eq!(overseer.prisoners(Color::White), 0);
        assert_eq!(overseer.group_at(&board, 2, 1).unwrap().liberty_count(), 3);
        assert_eq!(overseer.group_at(&board, 1, 2).unwrap().liberty_count(), 3);
        let capturer = board.get(1, 2).unwrap().unwrap();
        assert_eq!(capturer.captures(), &[board.identifier_for(1, 1)]);
        assert_liberties_consistent(&board, &overseer);
    }

    #[test]
    fn placement_order_does_not_matter() {
        let stones = [
            (2, 2, Color::Black),
            (3, 2, Color::Black),
            (2, 3, Color::White),
            (3, 3, Color::Black),
            (4, 4, Color::White),
            (4, 3, Color::Black),
        ];
        let (board_a, overseer_a) = place_all(&stones);
        let mut reversed = stones;
        reversed.reverse();
        let (board_b, overseer_b) = place_all(&reversed);
        assert_eq!(board_a.to_string(), board_b.to_string());
        for (point, stone) in board_a.iter().filter(|(_, s)| s.is_some()) {
            let a = overseer_a.group_at(&board_a, point.0, point.1).unwrap();
            let b = overseer_b.group_at(&board_b, point.0, point.1).unwrap();
            assert_eq!(a.stones().collect::<Vec<_>>(), b.stones().collect::<Vec<_>>());
            assert_eq!(
                a.liberties().collect::<Vec<_>>(),
                b.liberties().collect::<Vec<_>>(),
                "liberties of {stone:?}"
            );
        }
    }

    #[test]
    fn suicide_detection() {
        let (board, overseer) = place_all(&[(2, 1, Color::White), (1, 2, Color::White)]);
        assert!(overseer.would_be_suicide(&board, 1, 1, Color::Black));
        assert!(!overseer.would_be_suicide(&board, 1, 1, Color::White));
        assert!(!overseer.would_be_suicide(&board, 3, 3, Color::Black));
    }

    #[test]
    fn off_board_points_are_rejected_without_underflow() {
        let (mut board, mut overseer) = place_all(&[(2, 1, Color::White)]);
        assert!(!overseer.would_be_suicide(&board, 0, 1, Color::Black));
        assert!(!overseer.would_be_suicide(&board, 1, 0, Color::Black));
        assert!(!overseer.would_be_suicide(&board, 6, 6, Color::Black));
        assert_eq!(
            overseer.place(&mut board, 0, 3, Color::Black),
            Err(IllegalMove::OutOfBounds { x: 0, y: 3, size: 5 })
        );
        assert_eq!(overseer.groups().count(), 1);
    }

    #[test]
    fn filling_own_last_liberty_that_captures_is_not_suicide() {
        // (1,2) is surrounded by white, but white (1,1) is in atari.
        let (board, overseer) = place_all(&[
            (1, 1, Color::White),
            (2, 1, Color::Black),
            (2, 2, Color::White),
            (1, 3, Color::White),
        ]);
        assert!(!overseer.would_be_suicide(&board, 1, 2, Color::Black));
    }

    #[test]
    fn duplicate_rewires_handles() {
        let (board, overseer) = place_all(&[(1, 1, Color::Black), (2, 1, Color::Black)]);
        let mut board_copy = board.duplicate();
        let mut overseer_copy = overseer.duplicate(&mut board_copy);
        assert_liberties_consistent(&board_copy, &overseer_copy);

        overseer_copy
            .place(&mut board_copy, 1, 2, Color::White)
            .unwrap();
        assert_eq!(overseer.group_at(&board, 1, 1).unwrap().liberty_count(), 3);
        assert_eq!(
            overseer_copy
                .group_at(&board_copy, 1, 1)
                .unwrap()
                .liberty_count(),
            2
        );
        assert_liberties_consistent(&board, &overseer);
        assert_liberties_consistent(&board_copy, &overseer_copy);
    }
}
