//! Game flow: turn order, move legality, history and duplication.

use std::str::FromStr;

use fastrand::Rng;

use crate::board::Board;
use crate::constants::{DEFAULT_KOMI, DEFAULT_SIZE, EMPTY_MARKER, MAX_GAME_LEN_FACTOR};
use crate::error::{ConfigError, DiagramError, IllegalMove};
use crate::game_state::GameState;
use crate::group::{Group, GroupOverseer};
use crate::scoring::{self, Score, is_eyeish};
use crate::stone::{Color, Move};

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    /// Points credited to White.
    pub komi: f64,
    /// Points credited to Black. A non-zero handicap also lets White move first.
    pub handicap: u32,
    /// Reject moves by the color that is not to move.
    pub strict_turns: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            komi: DEFAULT_KOMI,
            handicap: 0,
            strict_turns: false,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize { size: self.size });
        }
        Ok(())
    }
}

/// A Go game in progress.
///
/// Turn order is advisory unless [`GameConfig::strict_turns`] is set: the
/// color to move is the opponent of whoever moved last.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    group_overseer: GroupOverseer,
    moves: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::build(GameConfig::default())
    }
}

impl Game {
    /// An empty `size`x`size` game with default komi and no handicap.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_config(GameConfig {
            size,
            ..GameConfig::default()
        })
    }

    /// Fails with [`ConfigError::InvalidSize`] for a board without cells.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.size),
            group_overseer: GroupOverseer::new(),
            moves: Vec::new(),
            config,
        }
    }

    /// Builds a game from rows of `X`, `O` and `-` markers.
    ///
    /// Stones are replayed through [`Game::play`] in row-major order, so groups
    /// and liberties are the same as for moves played one by one.
    pub fn from_diagram(diagram: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(DiagramError::Empty);
        }

        let size = rows.len();
        let mut game = Game::new(size)?;
        for (row, line) in rows.iter().enumerate() {
            let y = row + 1;
            let len = line.chars().count();
            if len != size {
                return Err(DiagramError::NotSquare { row: y, len, size });
            }
            for (col, marker) in line.chars().enumerate() {
                let x = col + 1;
                if marker == EMPTY_MARKER {
                    continue;
                }
                let color =
                    Color::from_marker(marker).ok_or(DiagramError::UnknownMarker { marker, x, y })?;
                game.play(x, y, color)?;
            }
        }
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn group_overseer(&self) -> &GroupOverseer {
        &self.group_overseer
    }

    pub fn group_at(&self, x: usize, y: usize) -> Option<&Group> {
        self.group_overseer.group_at(&self.board, x, y)
    }

    pub fn prisoners(&self, color: Color) -> usize {
        self.group_overseer.prisoners(color)
    }

    /// Every move played so far, passes included.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn no_moves_played(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of moves after which the game is cut off.
    pub fn max_moves(&self) -> usize {
        self.config.size * self.config.size * MAX_GAME_LEN_FACTOR
    }

    pub fn next_turn_color(&self) -> Color {
        match self.moves.last() {
            Some(last) => last.color().opponent(),
            None if self.config.handicap > 0 => Color::White,
            None => Color::Black,
        }
    }

    /// Finished after two consecutive passes or once the move cap is reached.
    pub fn finished(&self) -> bool {
        if self.moves.len() >= self.max_moves() {
            return true;
        }
        match self.moves.as_slice() {
            [.., a, b] => a.is_pass() && b.is_pass(),
            _ => false,
        }
    }

    fn check_turn(&self, color: Color) -> Result<(), IllegalMove> {
        if self.finished() {
            return Err(IllegalMove::GameFinished);
        }
        let expected = self.next_turn_color();
        if self.config.strict_turns && color != expected {
            return Err(IllegalMove::NotYourTurn {
                expected,
                got: color,
            });
        }
        Ok(())
    }

    /// Checks a placement without playing it.
    pub fn validate(&self, x: usize, y: usize, color: Color) -> Result<(), IllegalMove> {
        self.check_turn(color)?;
        if self.board.get(x, y)?.is_some() {
            return Err(IllegalMove::OccupiedCell { x, y });
        }
        if self.group_overseer.would_be_suicide(&self.board, x, y, color) {
            return Err(IllegalMove::SuicideMove { x, y });
        }
        Ok(())
    }

    pub fn is_valid_move(&self, x: usize, y: usize, color: Color) -> bool {
        self.validate(x, y, color).is_ok()
    }

    /// Plays a stone, failing if the move is illegal.
    pub fn play(&mut self, x: usize, y: usize, color: Color) -> Result<(), IllegalMove> {
        self.validate(x, y, color)?;
        self.group_overseer.place(&mut self.board, x, y, color)?;
        self.moves.push(Move::Play { x, y, color });
        Ok(())
    }

    /// Like [`Game::play`] but reports legality as a boolean.
    pub fn try_play(&mut self, x: usize, y: usize, color: Color) -> bool {
        self.play(x, y, color).is_ok()
    }

    pub fn pass(&mut self, color: Color) -> Result<(), IllegalMove> {
        self.check_turn(color)?;
        self.moves.push(Move::Pass { color });
        Ok(())
    }

    pub fn play_move(&mut self, mv: Move) -> Result<(), IllegalMove> {
        match mv {
            Move::Play { x, y, color } => self.play(x, y, color),
            Move::Pass { color } => self.pass(color),
        }
    }

    /// A fully independent copy with its own board, stones and groups.
    pub fn dup(&self) -> Self {
        let mut board = self.board.duplicate();
        let group_overseer = self.group_overseer.duplicate(&mut board);
        Self {
            config: self.config.clone(),
            board,
            group_overseer,
            moves: self.moves.clone(),
        }
    }

    pub fn score(&self) -> Score {
        scoring::score(&self.board, self.config.komi, self.config.handicap)
    }

    pub fn winner(&self) -> Color {
        self.score().winner()
    }
}

impl Clone for Game {
    fn clone(&self) -> Self {
        self.dup()
    }
}

impl FromStr for Game {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::from_diagram(s)
    }
}

impl GameState for Game {
    type Move = Move;
    type Error = IllegalMove;

    fn all_valid_moves(&self) -> Vec<Move> {
        if Game::finished(self) {
            return Vec::new();
        }
        let color = Game::next_turn_color(self);
        let mut moves: Vec<Move> = self
            .board
            .empty_points()
            .into_iter()
            .filter(|&(x, y)| self.is_valid_move(x, y, color))
            .map(|(x, y)| Move::Play { x, y, color })
            .collect();
        moves.push(Move::Pass { color });
        moves
    }

    fn set_move(&mut self, mv: Move) -> Result<(), IllegalMove> {
        self.play_move(mv)
    }

    fn finished(&self) -> bool {
        Game::finished(self)
    }

    fn won(&self) -> bool {
        self.winner() == Color::Black
    }

    fn next_turn_color(&self) -> Color {
        Game::next_turn_color(self)
    }

    /// A random legal placement that does not fill one of the mover's own
    /// eyes, or a pass when none is left.
    fn generate_move(&self, rng: &mut Rng) -> Move {
        let color = Game::next_turn_color(self);
        let mut candidates = self.board.empty_points();
        rng.shuffle(&mut candidates);
        candidates
            .into_iter()
            .find(|&(x, y)| {
                is_eyeish(&self.board, x, y) != Some(color) && self.is_valid_move(x, y, color)
            })
            .map_or(Move::Pass { color }, |(x, y)| Move::Play { x, y, color })
    }

    fn dup(&self) -> Self {
        Game::dup(self)
    }
}
