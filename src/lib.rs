//! Rubykon: a Go rule engine and a generic Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, diagram markers and search parameters
//! - [`stone`] - Colors, stones and moves
//! - [`board`] - Fixed-size grid owning every stone
//! - [`group`] - Connected groups, liberties and captures
//! - [`game`] - Turn order, legality, history and duplication
//! - [`scoring`] - Simple area scoring
//! - [`game_state`] - The trait a game implements to be searchable
//! - [`playout`] - Random game simulation
//! - [`mcts`] - UCT tree search
//! - [`double_step`] - Toy race game for exercising the search
//!
//! ## Example
//!
//! ```
//! use rubykon::game::Game;
//! use rubykon::mcts::{tree_search, SearchConfig};
//! use rubykon::stone::Color;
//!
//! let mut game = Game::new(5).unwrap();
//! game.play(3, 3, Color::Black).unwrap();
//!
//! let config = SearchConfig { playouts: 50, seed: Some(1), ..SearchConfig::default() };
//! let tree = tree_search(game.dup(), &config).unwrap();
//! println!("Best move: {:?}", tree.best_move());
//! ```

pub mod board;
pub mod constants;
pub mod double_step;
pub mod error;
pub mod game;
pub mod game_state;
pub mod group;
pub mod mcts;
pub mod playout;
pub mod scoring;
pub mod stone;
