//! A game engine and minimax agent for 'Connect 4' style games
//!
//! Players take turns dropping tokens into the columns of a rectangular
//! board, and the first to line up four tokens horizontally, vertically or
//! diagonally wins. Automated players choose their moves with depth-limited
//! minimax search and alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use connect_four::{GameState, Player, SearchConfig, Searcher, Decision, Token};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let players = vec![
//!     Player::manual("Alice", Token::RED),
//!     Player::manual("Bob", Token::YELLOW),
//! ];
//! // Alice has three in a row along the bottom
//! let state = GameState::from_moves(7, 6, players, "112233")?;
//! let result = Searcher::new(SearchConfig::new(3)).search(&state);
//!
//! assert!(matches!(result.decision, Decision::Play(m) if m.column() == 4));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod error;

pub mod player;

pub mod search;

pub mod state;


pub use board::{Board, Cell, Direction, Token, Window};
pub use error::GameError;
pub use player::{Control, MoveInput, Player};
pub use search::{evaluate, window_score, Score, SearchConfig, SearchResult, Searcher};
pub use state::{Decision, GameState, Move, Outcome};

/// The number of tokens in a row needed to win
pub const CONNECT: usize = 4;

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The default look-ahead of automated players, in plies
pub const DEFAULT_DEPTH: usize = 5;

// the default board must be able to hold a line in every direction
const_assert!(DEFAULT_WIDTH >= CONNECT && DEFAULT_HEIGHT >= CONNECT);
const_assert!(DEFAULT_DEPTH >= 1);
