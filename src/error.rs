//! Errors raised by board addressing, game construction and move application

use thiserror::Error;

use crate::board::Token;

/// Every way a core operation can be rejected
///
/// A failed operation never modifies the board or the turn order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board must be at least {min}x{min}, got {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("invalid players: {0}")]
    InvalidPlayers(String),

    #[error("cell ({column}, {row}) is outside the board")]
    OutOfBounds { column: usize, row: usize },

    #[error("column {column} out of range, columns must be between 1 and {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("player '{0}' may not act now")]
    NotYourTurn(Token),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("could not parse '{0}' as a valid move")]
    InvalidMoveCharacter(char),
}
