//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! The search is generic over [`GameState`]. Each iteration:
//! - selects a path from the root by UCT while every move of a node is tried
//! - expands one untried move into a new child
//! - plays a random rollout from that child (or from the terminal node reached)
//! - backpropagates the outcome up to the root
//!
//! Nodes live in an arena owned by the [`Tree`]; parents and children refer to
//! each other by [`NodeId`].

use fastrand::Rng;
use tracing::debug;

use crate::constants::{DEFAULT_PLAYOUTS, UCT_BIAS_FACTOR};
use crate::error::SearchError;
use crate::game_state::GameState;
use crate::playout::playout;
use crate::stone::Color;

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of search iterations.
    pub playouts: usize,
    /// Exploration constant in the UCT formula.
    pub uct_bias: f64,
    /// Seed for reproducible searches; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            playouts: DEFAULT_PLAYOUTS,
            uct_bias: UCT_BIAS_FACTOR,
            seed: None,
        }
    }
}

/// A node in the search tree.
pub struct Node<S: GameState> {
    /// The position at this node
    pub game_state: S,
    /// The move that led here (`None` at the root)
    pub mv: Option<S::Move>,
    parent: Option<NodeId>,
    /// Color whose move produced this position; wins are counted for it
    mover: Color,
    /// Number of wins for `mover` (win percentage = wins/visits)
    pub wins: f64,
    /// Number of visits
    pub visits: u32,
    pub children: Vec<NodeId>,
    untried_moves: Vec<S::Move>,
    leaf: bool,
}

impl<S: GameState> Node<S> {
    fn new(game_state: S, mv: Option<S::Move>, parent: Option<NodeId>, mover: Color) -> Self {
        let untried_moves = game_state.all_valid_moves();
        let leaf = game_state.finished();
        Self {
            game_state,
            mv,
            parent,
            mover,
            wins: 0.0,
            visits: 0,
            children: Vec::new(),
            untried_moves,
            leaf,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub fn has_untried_moves(&self) -> bool {
        !self.untried_moves.is_empty()
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    /// Fraction of visits won by the mover, 0 for an unvisited node.
    pub fn win_percentage(&self) -> f64 {
        if self.visits > 0 {
            self.wins / f64::from(self.visits)
        } else {
            0.0
        }
    }

    /// Black-centric outcome translated to this node's mover.
    fn credits(&self, black_won: bool) -> bool {
        black_won == (self.mover == Color::Black)
    }
}

/// A search tree rooted at the position being evaluated.
pub struct Tree<S: GameState> {
    nodes: Vec<Node<S>>,
    uct_bias: f64,
    rng: Rng,
}

impl<S: GameState> Tree<S> {
    pub fn new(game_state: S, config: &SearchConfig) -> Self {
        let mover = game_state.next_turn_color().opponent();
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            nodes: vec![Node::new(game_state, None, None, mover)],
            uct_bias: config.uct_bias,
            rng,
        }
    }

    pub fn root(&self) -> &Node<S> {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `wins/visits + C * sqrt(ln(parent.visits) / visits)`.
    ///
    /// Errors on the root and on nodes that were never visited.
    pub fn uct_value(&self, id: NodeId) -> Result<f64, SearchError> {
        let node = &self.nodes[id];
        let parent = node.parent.ok_or(SearchError::RootNode)?;
        if node.visits == 0 {
            return Err(SearchError::UnvisitedNode { node: id });
        }
        let visits = f64::from(node.visits);
        let parent_visits = f64::from(self.nodes[parent].visits);
        Ok(node.win_percentage() + self.uct_bias * (parent_visits.ln() / visits).sqrt())
    }

    /// The child with the highest UCT value; among equals the last one wins.
    pub fn uct_select_child(&self, id: NodeId) -> Result<Option<NodeId>, SearchError> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.nodes[id].children {
            let value = self.uct_value(child)?;
            if best.is_none_or(|(_, b)| value >= b) {
                best = Some((child, value));
            }
        }
        Ok(best.map(|(child, _)| child))
    }

    /// Descends from the root until a node with untried moves or a leaf.
    pub fn select(&self) -> Result<NodeId, SearchError> {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            if node.has_untried_moves() || node.is_leaf() {
                return Ok(current);
            }
            match self.uct_select_child(current)? {
                Some(child) => current = child,
                None => return Ok(current),
            }
        }
    }

    /// Turns one untried move of `id` into a new child and returns it.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let Some(mv) = self.nodes[id].untried_moves.pop() else {
            return Ok(id);
        };
        let parent = &self.nodes[id];
        let mover = parent.game_state.next_turn_color();
        let mut game_state = parent.game_state.dup();
        game_state.set_move(mv.clone()).map_err(SearchError::game)?;

        let child = self.nodes.len();
        self.nodes
            .push(Node::new(game_state, Some(mv), Some(id), mover));
        self.nodes[id].children.push(child);
        Ok(child)
    }

    /// Plays a copy of the node's position out. Returns `true` when Black won.
    pub fn rollout(&mut self, id: NodeId) -> Result<bool, SearchError> {
        let mut game_state = self.nodes[id].game_state.dup();
        playout(&mut game_state, &mut self.rng).map_err(SearchError::game)
    }

    /// Records one visit on `id` and every ancestor, crediting a win to each
    /// node whose mover won.
    pub fn backpropagate(&mut self, id: NodeId, black_won: bool) {
        let mut cursor = id;
        loop {
            let node = &mut self.nodes[cursor];
            node.visits += 1;
            if node.credits(black_won) {
                node.wins += 1.0;
            }
            match node.parent {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
    }

    /// One search iteration: select, expand, roll out, backpropagate.
    pub fn explore_tree(&mut self) -> Result<(), SearchError> {
        let selected = self.select()?;
        let playout_node = if self.nodes[selected].is_leaf() {
            selected
        } else {
            self.expand(selected)?
        };
        let black_won = self.rollout(playout_node)?;
        self.backpropagate(playout_node, black_won);
        Ok(())
    }

    /// Children of the root with their statistics.
    pub fn root_children(&self) -> impl Iterator<Item = &Node<S>> + '_ {
        self.root().children.iter().map(|&id| &self.nodes[id])
    }

    /// The most visited child of the root.
    pub fn best_child(&self) -> Option<&Node<S>> {
        self.root_children().max_by_key(|child| child.visits)
    }

    pub fn best_move(&self) -> Option<S::Move> {
        self.best_child().and_then(|child| child.mv.clone())
    }
}

/// Runs a full search from `game_state` and returns the tree.
///
/// The best move is the most visited child of the root, see [`Tree::best_move`].
pub fn tree_search<S: GameState>(game_state: S, config: &SearchConfig) -> Result<Tree<S>, SearchError> {
    let mut tree = Tree::new(game_state, config);
    for _ in 0..config.playouts {
        tree.explore_tree()?;
    }
    debug!(
        playouts = config.playouts,
        nodes = tree.len(),
        root_visits = tree.root().visits,
        "search finished"
    );
    Ok(tree)
}

/// Print debug information about the root's children.
pub fn dump_children<S: GameState>(tree: &Tree<S>) {
    for child in tree.root_children() {
        eprintln!(
            "move {:?} v={} w={} wr={:.3}",
            child.mv,
            child.visits,
            child.wins,
            child.win_percentage()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::double_step::DoubleStep;

    fn seeded(playouts: usize) -> SearchConfig {
        SearchConfig {
            playouts,
            seed: Some(42),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn new_tree_has_only_the_root() {
        let tree = Tree::new(DoubleStep::new(), &seeded(0));
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_root());
        assert!(!tree.root().is_leaf());
        assert!(tree.root().has_untried_moves());
        assert_eq!(tree.root().mover(), Color::White);
    }

    #[test]
    fn uct_value_rejects_root_and_unvisited_nodes() {
        let mut tree = Tree::new(DoubleStep::new(), &seeded(0));
        assert!(matches!(tree.uct_value(ROOT), Err(SearchError::RootNode)));
        let child = tree.expand(ROOT).unwrap();
        assert!(matches!(
            tree.uct_value(child),
            Err(SearchError::UnvisitedNode { node }) if node == child
        ));
        tree.backpropagate(child, true);
        let value = tree.uct_value(child).unwrap();
        assert!(value.is_finite());
    }

    #[test]
    fn expand_applies_the_move_to_a_copy() {
        let mut tree = Tree::new(DoubleStep::new(), &seeded(0));
        let first = tree.expand(ROOT).unwrap();
        let second = tree.expand(ROOT).unwrap();
        assert!(!tree.root().has_untried_moves());
        assert_eq!(tree.root().children, vec![first, second]);
        assert_eq!(tree.root().game_state.position(Color::Black), 0);

        let mut moves = vec![tree.node(first).mv, tree.node(second).mv];
        moves.sort();
        assert_eq!(moves, vec![Some(1), Some(2)]);
        let child = tree.node(first);
        assert_eq!(child.game_state.position(Color::Black), child.mv.unwrap());
        assert_eq!(child.mover(), Color::Black);
        assert_eq!(child.parent(), Some(ROOT));
        // Untried moves of a child are computed from its own position.
        assert!(child.has_untried_moves());
    }

    #[test]
    fn backpropagate_reaches_the_root() {
        let mut tree = Tree::new(DoubleStep::new(), &seeded(0));
        let child = tree.expand(ROOT).unwrap();
        tree.backpropagate(child, true);
        let grandchild = tree.expand(child).unwrap();
        tree.backpropagate(grandchild, true);

        assert_eq!(tree.root().visits, 2);
        assert_eq!(tree.node(child).visits, 2);
        assert_eq!(tree.node(grandchild).visits, 1);
        // Black moved into `child`, White into `grandchild` and the root.
        assert_eq!(tree.node(child).wins, 2.0);
        assert_eq!(tree.node(grandchild).wins, 0.0);
        assert_eq!(tree.root().wins, 0.0);
    }

    #[test]
    fn terminal_node_is_a_leaf() {
        let mut tree = Tree::new(DoubleStep::with_positions(5, 0), &seeded(0));
        let child = tree.expand(ROOT).unwrap();
        assert!(tree.node(child).is_leaf());
        assert!(!tree.node(child).has_untried_moves());
        assert!(tree.rollout(child).unwrap());
    }

    #[test]
    fn every_iteration_visits_the_root() {
        let tree = tree_search(DoubleStep::new(), &seeded(50)).unwrap();
        assert_eq!(tree.root().visits, 50);
        let child_visits: u32 = tree.root_children().map(|c| c.visits).sum();
        assert_eq!(child_visits, 50);
    }

    #[test]
    fn picks_the_immediately_winning_move() {
        // Black at 4 wins at once with 2; with 1 White can win first.
        let tree = tree_search(DoubleStep::with_positions(4, 4), &seeded(200)).unwrap();
        assert_eq!(tree.best_move(), Some(2));
        let best = tree.best_child().unwrap();
        assert_eq!(best.win_percentage(), 1.0);
    }

    /// A game whose only move is always refused.
    #[derive(Clone)]
    struct Jammed;

    #[derive(Debug, thiserror::Error)]
    #[error("jammed")]
    struct JammedError;

    impl GameState for Jammed {
        type Move = ();
        type Error = JammedError;

        fn all_valid_moves(&self) -> Vec<()> {
            vec![()]
        }
        fn set_move(&mut self, _: ()) -> Result<(), JammedError> {
            Err(JammedError)
        }
        fn finished(&self) -> bool {
            false
        }
        fn won(&self) -> bool {
            false
        }
        fn next_turn_color(&self) -> Color {
            Color::Black
        }
        fn generate_move(&self, _: &mut Rng) {}
        fn dup(&self) -> Self {
            Jammed
        }
    }

    #[test]
    fn rejected_moves_surface_the_game_error() {
        match tree_search(Jammed, &seeded(1)).err() {
            Some(SearchError::Game(source)) => assert!(source.downcast_ref::<JammedError>().is_some()),
            other => panic!("expected a game error, got {other:?}"),
        }
    }

    #[test]
    fn search_on_a_finished_game_only_visits_the_root() {
        let tree = tree_search(DoubleStep::with_positions(6, 0), &seeded(10)).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().visits, 10);
        assert_eq!(tree.best_move(), None);
    }
}
